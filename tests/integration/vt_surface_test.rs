//! Integration tests for the bundled virtual terminal surface

use termreel::surface::Color;
use termreel::{ExecMode, RenderSurface, VtSurface};

fn screen(cols: usize, rows: usize, content: &str) -> VtSurface {
    let mut surface = VtSurface::new(cols, rows);
    surface.write(content, ExecMode::Immediate);
    surface
}

#[test]
fn shell_session_text() {
    let surface = screen(20, 4, "$ echo hi\r\nhi\r\n$ ");

    insta::assert_snapshot!(surface.to_string(), @r"
    $ echo hi
    hi
    $
    ");
    assert_eq!(surface.cursor(), (2, 2));
}

#[test]
fn lines_leaving_the_top_go_to_scrollback() {
    let surface = screen(10, 2, "1\r\n2\r\n3");

    assert_eq!(surface.to_string(), "2\n3");
    assert_eq!(surface.scrollback_len(), 1);
    assert_eq!(surface.snapshot().scrollback[0][0].char, '1');
}

#[test]
fn clear_and_home_start_over() {
    let surface = screen(10, 3, "abc\r\ndef\x1b[2J\x1b[Hx");
    assert_eq!(surface.to_string(), "x");
}

#[test]
fn carriage_return_and_erase_line_rewrite_progress() {
    let surface = screen(10, 1, "50%\r\x1b[K100%");
    assert_eq!(surface.to_string(), "100%");
}

#[test]
fn wide_characters_take_two_cells_and_wrap() {
    let surface = screen(4, 2, "日本語");

    assert_eq!(surface.to_string(), "日 本\n語");
    assert_eq!(surface.cursor(), (2, 1));
}

#[test]
fn save_and_restore_cursor() {
    let surface = screen(10, 1, "ab\x1b7cd\x1b8X");
    assert_eq!(surface.to_string(), "abXd");
}

#[test]
fn delete_chars_shift_the_rest_left() {
    let surface = screen(10, 1, "abcdef\r\x1b[2P");
    assert_eq!(surface.to_string(), "cdef");
}

#[test]
fn reverse_index_at_the_top_scrolls_down() {
    let surface = screen(10, 2, "top\x1bMnew");
    assert_eq!(surface.to_string(), "   new\ntop");
}

#[test]
fn scroll_region_keeps_the_footer_in_place() {
    let surface = screen(
        10,
        4,
        "\x1b[2;3r\x1b[4;1Hfooter\x1b[2;1Ha\r\nb\r\nc",
    );

    assert_eq!(surface.to_string(), "\nb\nc\nfooter");
    assert_eq!(surface.scrollback_len(), 0);
    assert_eq!(surface.snapshot().scroll_region, Some((1, 2)));
}

#[test]
fn colors_and_attributes_reach_cells() {
    let surface = screen(10, 1, "\x1b[1;38;5;208mA\x1b[0;44mB\x1b[0mC");
    let row = surface.row(0).unwrap();

    assert!(row[0].style.bold);
    assert_eq!(row[0].style.fg, Color::Indexed(208));
    assert_eq!(row[1].style.bg, Color::Indexed(4));
    assert!(!row[1].style.bold);
    assert!(row[2].style.is_default());
}

#[test]
fn cursor_visibility_is_part_of_the_snapshot() {
    let source = screen(10, 2, "busy\x1b[?25l");
    let snapshot = source.snapshot();
    assert!(snapshot.cursor_hidden);

    let mut target = VtSurface::new(10, 2);
    target.apply_snapshot(&snapshot);

    assert!(target.cursor_hidden());
    assert_eq!(target.snapshot(), snapshot);
}

#[test]
fn restoring_a_snapshot_then_writing_matches_direct_output() {
    let direct = screen(12, 3, "\x1b[32mone\x1b[0m\r\ntwo\r\nthree\r\nfour");

    let partial = screen(12, 3, "\x1b[32mone\x1b[0m\r\ntwo\r\n");
    let mut restored = VtSurface::new(12, 3);
    restored.apply_snapshot(&partial.snapshot());
    restored.write("three\r\nfour", ExecMode::Immediate);

    assert_eq!(restored.snapshot(), direct.snapshot());
}

#[test]
fn deferred_work_is_applied_in_order_on_settle() {
    let mut surface = VtSurface::new(10, 2);
    surface.write("old", ExecMode::Deferred);
    surface.reset(ExecMode::Deferred);
    surface.write("new", ExecMode::Deferred);
    assert_eq!(surface.to_string(), "");

    let before = surface.revision();
    assert!(surface.poll_settled());

    assert_eq!(surface.to_string(), "new");
    assert_eq!(surface.revision(), before + 3);
}

#[test]
fn unknown_sequences_are_ignored() {
    let surface = screen(10, 1, "X\x1b[5ZY\x1b]0;title\x07Z");
    assert_eq!(surface.to_string(), "XYZ");
}
