//! Keypad layout and key-to-action mapping

use crate::number::Operator;
use thiserror::Error;

/// One press of a calculator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Digit(u8),
    Point,
    Negate,
    Backspace,
    Clear,
    ClearEntry,
    Operator(Operator),
    Calculate,
}

impl Action {
    pub fn label(self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Action::Digit(d) => DIGITS[usize::from(d.min(9))],
            Action::Point => ".",
            Action::Negate => "+/-",
            Action::Backspace => "<-",
            Action::Clear => "C",
            Action::ClearEntry => "CE",
            Action::Operator(Operator::Add) => "+",
            Action::Operator(Operator::Subtract) => "-",
            Action::Operator(Operator::Multiply) => "*",
            Action::Operator(Operator::Divide) => "/",
            Action::Calculate => "=",
        }
    }

    /// Map a typed character to an action.
    ///
    /// Besides the symbols on the keys: `,` is a point, `n` negates,
    /// `b` is backspace, `c` clears all and `e` clears the entry.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Action::Digit(d as u8));
        }
        if let Some(op) = Operator::from_symbol(c) {
            return Some(Action::Operator(op));
        }
        match c.to_ascii_lowercase() {
            '.' | ',' => Some(Action::Point),
            '=' => Some(Action::Calculate),
            'n' => Some(Action::Negate),
            'b' => Some(Action::Backspace),
            'c' => Some(Action::Clear),
            'e' => Some(Action::ClearEntry),
            _ => None,
        }
    }
}

/// Button grid, top row first.
pub const KEYPAD: [[Action; 4]; 5] = [
    [Action::Clear, Action::ClearEntry, Action::Backspace, Action::Operator(Operator::Divide)],
    [Action::Digit(7), Action::Digit(8), Action::Digit(9), Action::Operator(Operator::Multiply)],
    [Action::Digit(4), Action::Digit(5), Action::Digit(6), Action::Operator(Operator::Subtract)],
    [Action::Digit(1), Action::Digit(2), Action::Digit(3), Action::Operator(Operator::Add)],
    [Action::Negate, Action::Digit(0), Action::Point, Action::Calculate],
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key {ch:?} at position {position}")]
pub struct ParseKeysError {
    pub ch: char,
    pub position: usize,
}

/// Turn a key script such as `"12+3n="` into actions. Whitespace is skipped.
pub fn parse_keys(script: &str) -> Result<Vec<Action>, ParseKeysError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, ch)| Action::from_char(ch).ok_or(ParseKeysError { ch, position }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let actions = parse_keys("12 + 3n =").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Digit(1),
                Action::Digit(2),
                Action::Operator(Operator::Add),
                Action::Digit(3),
                Action::Negate,
                Action::Calculate,
            ]
        );
    }

    #[test]
    fn test_parse_control_letters() {
        assert_eq!(
            parse_keys("bCe,").unwrap(),
            vec![Action::Backspace, Action::Clear, Action::ClearEntry, Action::Point]
        );
    }

    #[test]
    fn test_parse_reports_position() {
        let err = parse_keys("1+x").unwrap_err();
        assert_eq!(err, ParseKeysError { ch: 'x', position: 2 });
        assert_eq!(err.to_string(), "unknown key 'x' at position 2");
    }

    #[test]
    fn test_keypad_has_every_key_once() {
        let keys: Vec<Action> = KEYPAD.iter().flatten().copied().collect();
        assert_eq!(keys.len(), 20);
        for d in 0..=9 {
            assert_eq!(keys.iter().filter(|a| **a == Action::Digit(d)).count(), 1);
        }
        for op in Operator::ALL {
            assert!(keys.contains(&Action::Operator(op)));
        }
    }

    #[test]
    fn test_labels_map_back_for_symbol_keys() {
        for action in KEYPAD.iter().flatten().copied() {
            let mut chars = action.label().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                assert_eq!(Action::from_char(c), Some(action), "{action:?}");
            }
        }
    }
}
