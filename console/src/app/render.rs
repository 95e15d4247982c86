//! Plain-text rendering for the list and detail screens.
//!
//! Money is rounded to two decimals here and only here; the domain carries
//! raw `f64` amounts throughout.

/// Currency prefix used across the store.
const CURRENCY: &str = "S/.";

/// Format an amount for display.
pub fn money(amount: f64) -> String {
    format!("{CURRENCY} {amount:.2}")
}

/// Render yes/no flags the way the screens show them.
pub fn flag(value: bool) -> String {
    if value { "yes".to_owned() } else { "no".to_owned() }
}

/// Render rows as an aligned table with a dashed header rule.
///
/// Column widths follow the widest cell; rows shorter than the header are
/// padded with blanks.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index >= widths.len() {
                widths.push(0);
            }
            let cell_width = cell.chars().count();
            if cell_width > widths[index] {
                widths[index] = cell_width;
            }
        }
    }

    let mut out = String::new();
    render_row(
        &mut out,
        &headers.iter().map(ToString::to_string).collect::<Vec<_>>(),
        &widths,
    );
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    render_row(&mut out, &rule, &widths);
    for row in rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut rendered: Vec<String> = Vec::with_capacity(widths.len());
    for (index, width) in widths.iter().enumerate() {
        let cell = cells.get(index).map_or("", String::as_str);
        let padding = width.saturating_sub(cell.chars().count());
        rendered.push(format!("{cell}{}", " ".repeat(padding)));
    }
    let line = rendered.join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, "S/. 0.00")]
    #[case(30.0, "S/. 30.00")]
    #[case(12.345, "S/. 12.35")]
    #[case(12.344, "S/. 12.34")]
    fn money_rounds_to_two_decimals_at_display_time(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(money(amount), expected);
    }

    #[rstest]
    fn tables_align_columns_and_rule_under_headers() {
        let rendered = table(
            &["id", "name", "price"],
            &[
                vec!["3".to_owned(), "Laptop".to_owned(), money(15.0)],
                vec!["4".to_owned(), "Mouse".to_owned(), money(5.5)],
            ],
        );
        let expected = "\
id  name    price\n\
--  ------  ---------\n\
3   Laptop  S/. 15.00\n\
4   Mouse   S/. 5.50\n";
        assert_eq!(rendered, expected);
    }

    #[rstest]
    fn empty_tables_still_render_their_headers() {
        let rendered = table(&["id"], &[]);
        assert_eq!(rendered, "id\n--\n");
    }
}
