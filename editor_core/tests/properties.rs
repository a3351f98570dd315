//! Property tests for buffer persistence and history

use std::fs;

use editor_core::{Direction, TextBuffer};
use proptest::prelude::*;
use tempfile::tempdir;

#[derive(Debug, Clone)]
enum Op {
    Insert(char),
    Backspace,
    LineFeed,
    Move(Direction),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::char::range('a', 'e').prop_map(Op::Insert),
        2 => Just(Op::Backspace),
        1 => Just(Op::LineFeed),
        1 => Just(Op::Move(Direction::Up)),
        1 => Just(Op::Move(Direction::Down)),
        1 => Just(Op::Move(Direction::Left)),
        1 => Just(Op::Move(Direction::Right)),
    ]
}

fn edit_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::char::range('a', 'e').prop_map(Op::Insert),
        2 => Just(Op::Backspace),
        1 => Just(Op::LineFeed),
    ]
}

fn move_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Move(Direction::Up)),
        Just(Op::Move(Direction::Down)),
        Just(Op::Move(Direction::Left)),
        Just(Op::Move(Direction::Right)),
    ]
}

fn apply(buffer: &mut TextBuffer, op: &Op) {
    match op {
        Op::Insert(ch) => buffer.insert_chr(*ch),
        Op::Backspace => {
            buffer.back_space();
        }
        Op::LineFeed => buffer.line_feed(),
        Op::Move(direction) => {
            buffer.move_pos(*direction);
        }
    }
}

proptest! {
    #[test]
    fn prop_load_save_round_trip(content in "[a-z \r\n\u{e9}]{0,60}") {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.txt");
        fs::write(&path, &content).unwrap();

        let mut buffer = TextBuffer::from_file(&path).unwrap();
        buffer.write_buf_to_file().unwrap();

        prop_assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn prop_undo_reverses_every_edit(
        content in "[a-z\n]{0,30}",
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut buffer = TextBuffer::from_string(&content);
        for op in &ops {
            apply(&mut buffer, op);
        }
        let edited = buffer.as_string();

        while buffer.undo() {}
        prop_assert_eq!(buffer.as_string(), content);

        while buffer.redo() {}
        prop_assert_eq!(buffer.as_string(), edited);
    }

    #[test]
    fn prop_undo_redo_restore_cursor(
        content in "[a-z\n]{0,30}",
        moves in prop::collection::vec(move_strategy(), 0..20),
        edits in prop::collection::vec(edit_strategy(), 1..40),
    ) {
        let mut buffer = TextBuffer::from_string(&content);
        for op in &moves {
            apply(&mut buffer, op);
        }
        let before = buffer.cursor();

        for op in &edits {
            apply(&mut buffer, op);
        }
        let after = buffer.cursor();
        let edited = buffer.as_string();

        while buffer.undo() {}
        prop_assert_eq!(buffer.as_string(), content);
        prop_assert_eq!(buffer.cursor(), before);

        while buffer.redo() {}
        prop_assert_eq!(buffer.as_string(), edited);
        prop_assert_eq!(buffer.cursor(), after);
    }

    #[test]
    fn prop_cursor_stays_in_bounds(
        content in "[a-z\n]{0,30}",
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut buffer = TextBuffer::from_string(&content);
        for op in &ops {
            apply(&mut buffer, op);
            let cursor = buffer.cursor();
            prop_assert!(cursor.row < buffer.line_count());
            prop_assert!(cursor.col <= buffer.line_len(cursor.row));
        }
        prop_assert!(buffer.line_count() >= 1);
    }
}
