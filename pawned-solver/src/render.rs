//! Plain-text board drawing for the terminal.

use std::fmt::Write;

use pawned_core::{Move, Outcome, Position};

/// Draw the board with column numbers across the top and row numbers down
/// the left edge. Empty cells are blank; occupied cells show the label.
///
/// Cells are two characters wide until labels or column numbers need more,
/// so boards with ten or more columns stay aligned.
pub fn render(position: &Position) -> String {
    let cols = position.cols();
    let cell = digits(cols - 1) + 1;
    let margin = digits(position.rows() - 1) + 1;

    let mut header = " ".repeat(margin);
    for col in 0..cols {
        let _ = write!(header, "{:<width$}", col, width = cell + 1);
    }
    let separator = format!("{}{}", " ".repeat(margin), vec!["-".repeat(cell); cols].join(" "));

    let mut out = String::new();
    out.push('\n');
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&separator);
    for row in 0..position.rows() {
        let _ = write!(out, "\n{:>width$}|", row, width = margin - 1);
        for col in 0..cols {
            match position.at(row, col) {
                Some(label) => {
                    let _ = write!(out, "{:<width$}|", label.to_string(), width = cell);
                }
                None => {
                    let _ = write!(out, "{:width$}|", "", width = cell);
                }
            }
        }
        out.push('\n');
        out.push_str(&separator);
    }
    out.push('\n');
    out
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// One `label row col` line per move.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| format!("{}\n", m)).collect()
}

pub fn banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::WhiteWins => "White Wins!",
        Outcome::BlackWins => "Black Wins!",
        Outcome::Draw => "It's a draw!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawned_core::{Label, Side};

    #[test]
    fn test_render_initial_board() {
        let expected = "
  0  1  2  3  4
  -- -- -- -- --
0|B0|B1|B2|B3|B4|
  -- -- -- -- --
1|  |  |  |  |  |
  -- -- -- -- --
2|  |  |  |  |  |
  -- -- -- -- --
3|  |  |  |  |  |
  -- -- -- -- --
4|  |  |  |  |  |
  -- -- -- -- --
5|W0|W1|W2|W3|W4|
  -- -- -- -- --
";
        assert_eq!(render(&Position::default()), expected);
    }

    #[test]
    fn test_render_other_shape() {
        let position = Position::new(3, 2).unwrap();
        let expected = "
  0  1
  -- --
0|B0|B1|
  -- --
1|  |  |
  -- --
2|W0|W1|
  -- --
";
        assert_eq!(render(&position), expected);
    }

    #[test]
    fn test_render_wide_board_stays_aligned() {
        let text = render(&Position::new(11, 12).unwrap());
        let lines: Vec<&str> = text.lines().skip(1).collect();

        let header: String = (0..12).map(|c| format!("{:<4}", c)).collect();
        assert_eq!(lines[0], format!("   {}", header.trim_end()));
        assert_eq!(lines[1], format!("   {}", vec!["---"; 12].join(" ")));
        assert!(lines[2].starts_with(" 0|B0 |B1 |"));
        assert!(lines[2].ends_with("|B10|B11|"));
        assert_eq!(lines[4], format!(" 1|{}", "   |".repeat(12)));
        assert!(lines[22].starts_with("10|W0 |"));

        // Every cell boundary lines up with the separator gaps
        let width = lines[1].len() + 1;
        for line in lines.iter().filter(|l| l.contains('|')) {
            assert_eq!(line.len(), width, "{:?}", line);
        }
    }

    #[test]
    fn test_render_after_move() {
        let mut position = Position::default();
        position.apply_in_place(Move::new(Label::new(Side::White, 2), 4, 2));
        let text = render(&position);
        assert!(text.contains("\n4|  |  |W2|  |  |\n"));
        assert!(text.contains("\n5|W0|W1|  |W3|W4|\n"));
    }

    #[test]
    fn test_format_moves() {
        let moves = Position::default().legal_moves(Side::Black);
        assert_eq!(format_moves(&moves[..2]), "B0 1 0\nB1 1 1\n");
        assert_eq!(format_moves(&[]), "");
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner(Outcome::WhiteWins), "White Wins!");
        assert_eq!(banner(Outcome::BlackWins), "Black Wins!");
        assert_eq!(banner(Outcome::Draw), "It's a draw!");
    }
}
