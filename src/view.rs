//! Formatting transactions for display.

use unicode_segmentation::UnicodeSegmentation;

use crate::transaction::TransactionRecord;

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
pub const MAX_TITLE_GRAPHEMES: usize = 32;

/// Shorten `title` to fit the title column of the table.
///
/// Titles longer than [MAX_TITLE_GRAPHEMES] graphemes end in "...".
pub fn format_title(title: &str) -> String {
    let mut graphemes = title.graphemes(true);
    let head: String = graphemes.by_ref().take(MAX_TITLE_GRAPHEMES).collect();

    if graphemes.next().is_none() {
        return head;
    }

    head.graphemes(true)
        .take(MAX_TITLE_GRAPHEMES - 3)
        .chain(std::iter::once("..."))
        .collect()
}

/// Render `records` as a plain text table with the columns ID, title and cost.
pub fn transactions_table(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "No transactions yet.\n".to_owned();
    }

    let rows: Vec<(String, String, &str)> = records
        .iter()
        .map(|record| {
            (
                record.id.to_string(),
                format_title(record.title.as_ref()),
                record.cost.as_str(),
            )
        })
        .collect();

    let id_width = column_width("ID", rows.iter().map(|(id, _, _)| id.as_str()));
    let title_width = column_width("Title", rows.iter().map(|(_, title, _)| title.as_str()));

    let mut table = String::new();
    push_row(&mut table, ("ID", "Title", "Cost"), id_width, title_width);
    for (id, title, cost) in &rows {
        push_row(&mut table, (id.as_str(), title.as_str(), *cost), id_width, title_width);
    }

    table
}

/// Render `records` as a JSON array.
///
/// # Errors
/// Returns an error if a record cannot be serialized.
pub fn transactions_json(records: &[TransactionRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.graphemes(true).count())
        .chain(std::iter::once(header.graphemes(true).count()))
        .max()
        .unwrap_or_default()
}

fn push_row(table: &mut String, row: (&str, &str, &str), id_width: usize, title_width: usize) {
    let (id, title, cost) = row;
    let id_padding = id_width - id.graphemes(true).count();
    let title_padding = title_width - title.graphemes(true).count();

    table.push_str(&" ".repeat(id_padding));
    table.push_str(id);
    table.push_str("  ");
    table.push_str(title);
    table.push_str(&" ".repeat(title_padding));
    table.push_str("  ");
    table.push_str(cost);
    table.push('\n');
}


#[cfg(test)]
mod transactions_table_tests {
    use crate::transaction::NewTransaction;

    use super::{transactions_json, transactions_table};

    #[test]
    fn empty_list_shows_placeholder() {
        assert_eq!(transactions_table(&[]), "No transactions yet.\n");
    }

    #[test]
    fn columns_are_aligned() {
        let records = vec![
            NewTransaction::new("Coffee", "3.50").unwrap().finalise(1),
            NewTransaction::new("Lunch", "12.00").unwrap().finalise(10),
        ];

        let table = transactions_table(&records);

        assert_eq!(
            table,
            "ID  Title   Cost\n 1  Coffee  3.50\n10  Lunch   12.00\n"
        );
    }

    #[test]
    fn json_contains_all_fields() {
        let records = vec![NewTransaction::new("Coffee", "3.50").unwrap().finalise(7)];

        let json = transactions_json(&records).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed,
            serde_json::json!([{ "id": 7, "title": "Coffee", "cost": "3.50" }])
        );
    }
}
