use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;

use super::*;

fn rows(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| vec![format!("id-{}", i), format!("/compat/{}", i)])
        .collect()
}

fn keys(codes: &[KeyCode]) -> VecDeque<KeyEvent> {
    codes
        .iter()
        .map(|c| KeyEvent::new(*c, KeyModifiers::NONE))
        .collect()
}

fn terminal(cols: u16, rows: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(cols, rows)).expect("test terminal")
}

fn line_text(term: &Terminal<TestBackend>, y: u16) -> String {
    let buf = term.backend().buffer();
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn empty_list_is_cancelled_without_drawing() -> Result<(), MenuError> {
    let items: Vec<Vec<String>> = Vec::new();
    let mut term = terminal(60, 12);
    let mut script = VecDeque::new();

    let out = PaginatedMenu::new(&items, &[0]).run(&mut term, &mut script)?;
    assert_eq!(out, MenuOutcome::Cancelled);
    assert!(term.backend().buffer().content.iter().all(|c| c.symbol() == " "));
    Ok(())
}

#[test]
fn select_on_empty_list_never_opens_a_session() -> Result<(), MenuError> {
    let items: Vec<Vec<String>> = Vec::new();
    assert_eq!(PaginatedMenu::new(&items, &[0]).select()?, Selection::Cancelled);
    Ok(())
}

#[test]
fn commit_on_second_page_returns_global_index() -> Result<(), MenuError> {
    // 12 rows tall leaves 6 rows per page.
    let items = rows(10);
    let mut term = terminal(60, 12);
    let mut script = keys(&[
        KeyCode::Down,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Enter,
    ]);

    let out = PaginatedMenu::new(&items, &[0, 1])
        .title("Pick one")
        .run(&mut term, &mut script)?;
    assert_eq!(out, MenuOutcome::Selected(7));
    assert_eq!(items[7][0], "id-7");
    Ok(())
}

#[test]
fn highlighted_row_is_reverse_video() -> Result<(), MenuError> {
    let items = rows(3);
    let mut term = terminal(60, 12);
    let mut script = keys(&[KeyCode::Down, KeyCode::Enter]);

    PaginatedMenu::new(&items, &[0, 1]).run(&mut term, &mut script)?;

    // List box starts at (6, 2); rows start inside the border.
    let buf = term.backend().buffer();
    assert!(!buf[(7, 3)].modifier.contains(Modifier::REVERSED));
    assert!(buf[(7, 4)].modifier.contains(Modifier::REVERSED));
    assert!(line_text(&term, 4).contains("id-1"));
    assert!(line_text(&term, 4).trim_end().ends_with("/compat/1│"));
    assert!(line_text(&term, 0).starts_with("ncps v"));
    Ok(())
}

#[test]
fn title_is_centred_on_second_line() -> Result<(), MenuError> {
    let items = rows(2);
    let mut term = terminal(60, 12);
    let mut script = keys(&[KeyCode::Enter]);

    PaginatedMenu::new(&items, &[0])
        .title("Select")
        .run(&mut term, &mut script)?;
    let line = line_text(&term, 1);
    assert_eq!(line.trim(), "Select");
    assert_eq!(line.find("Select"), Some(27));
    Ok(())
}

#[test]
fn escape_and_quit_key_abort() -> Result<(), MenuError> {
    let items = rows(4);

    let mut term = terminal(60, 12);
    let out = PaginatedMenu::new(&items, &[0]).run(&mut term, &mut keys(&[KeyCode::Esc]))?;
    assert_eq!(out, MenuOutcome::Abort);

    let mut term = terminal(60, 12);
    let out = PaginatedMenu::new(&items, &[0])
        .quit_key('x')
        .run(&mut term, &mut keys(&[KeyCode::Char('q'), KeyCode::Char('x')]))?;
    assert_eq!(out, MenuOutcome::Abort);
    Ok(())
}

#[test]
fn too_few_rows_is_terminal_too_small() {
    let items = rows(4);
    let mut term = terminal(60, 6);
    let err = PaginatedMenu::new(&items, &[0])
        .run(&mut term, &mut VecDeque::new())
        .unwrap_err();
    assert!(matches!(
        err,
        MenuError::TerminalTooSmall { cols: 60, rows: 6 }
    ));
}

#[test]
fn too_few_columns_is_terminal_too_small() {
    let items = rows(4);
    let mut term = terminal(39, 20);
    let err = PaginatedMenu::new(&items, &[0])
        .run(&mut term, &mut VecDeque::new())
        .unwrap_err();
    assert!(matches!(err, MenuError::TerminalTooSmall { .. }));
}

#[test]
fn smallest_usable_terminal_shows_one_row_per_page() -> Result<(), MenuError> {
    let items = rows(3);
    let mut term = terminal(40, 7);
    let mut script = keys(&[KeyCode::Right, KeyCode::Right, KeyCode::Enter]);

    let out = PaginatedMenu::new(&items, &[0]).run(&mut term, &mut script)?;
    assert_eq!(out, MenuOutcome::Selected(2));
    Ok(())
}

#[test]
fn wide_title_does_not_push_the_path_off_the_row() -> Result<(), MenuError> {
    let items = vec![vec![
        "1234".to_string(),
        "ファイナルファンタジー".to_string(),
        "/compatdata/1234".to_string(),
    ]];
    let mut term = terminal(60, 12);
    let out = PaginatedMenu::new(&items, &[0, 1, 2]).run(&mut term, &mut keys(&[KeyCode::Enter]))?;
    assert_eq!(out, MenuOutcome::Selected(0));

    let line = line_text(&term, 3);
    assert!(line.contains("1234"));
    assert!(line.contains("/compatdata/1234"));
    Ok(())
}
