use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{GiveAnswerChip, Header, MessageList, ModeBar, Welcome};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    tui.sync(app);
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [header_area, main_area, input_area, mode_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)])
            .areas(frame.area());

    Header::new(
        app.status_message.clone(),
        app.session_id.short().to_string(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, header_area);

    let main_area = main_area.inner(Margin::new(1, 0));
    if app.messages.is_empty() && !app.is_thinking {
        Welcome.render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.messages,
            app.is_thinking,
            app.mode,
            spinner_frame,
        )
        .render(frame, main_area);
    }

    tui.input_box.render(frame, input_area);
    ModeBar::new(app.mode, GiveAnswerChip::for_app(app)).render(frame, mode_area);
}
