use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::{EngineError, ResultEngine, Transaction};

const HEADER: [&str; 4] = ["Date", "Transaction Type", "Amount", "Description"];

/// Write transactions as CSV, one row per transaction after a header row.
pub fn render_csv(transactions: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(report_error)?;
    for tx in transactions {
        writer
            .write_record([
                tx.occurred_at.date_naive().to_string(),
                tx.kind.label().to_string(),
                tx.amount.to_string(),
                tx.description.clone(),
            ])
            .map_err(report_error)?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::Report(err.to_string()))
}

// US letter
const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;
const TITLE_SIZE: f32 = 16.0;
const TEXT_SIZE: f32 = 10.0;

/// Render a letter-size PDF statement: title, `period`, then one line per
/// transaction. Pages are added as needed.
pub fn render_pdf(title: &str, period: &str, transactions: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "statement");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| EngineError::Report(err.to_string()))?;

    let top = PAGE_HEIGHT.0 - MARGIN;
    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(title, TITLE_SIZE, Mm(MARGIN), Mm(top), &font);
    current.use_text(period, TEXT_SIZE, Mm(MARGIN), Mm(top - 2.0 * LINE_HEIGHT), &font);

    let mut y = top - 4.0 * LINE_HEIGHT;
    for tx in transactions {
        if y < MARGIN {
            let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "statement");
            current = doc.get_page(page).get_layer(layer);
            y = top;
        }
        let line = format!(
            "{} - {} - {} - {}",
            tx.occurred_at.date_naive(),
            tx.kind.label(),
            tx.amount,
            tx.description
        );
        current.use_text(line, TEXT_SIZE, Mm(MARGIN), Mm(y), &font);
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|err| EngineError::Report(err.to_string()))
}

fn report_error(err: csv::Error) -> EngineError {
    EngineError::Report(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{Money, TransactionKind};

    fn sample(count: usize) -> Vec<Transaction> {
        let user_id = Uuid::new_v4();
        (0..count)
            .map(|i| {
                Transaction::new(
                    user_id,
                    TransactionKind::Deposit,
                    Money::new(1000 + i as i64),
                    format!("salary, part {i}"),
                    Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn csv_has_header_and_quoted_fields() {
        let csv = String::from_utf8(render_csv(&sample(1)).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Date,Transaction Type,Amount,Description\n2024-05-02,Deposit,10.00,\"salary, part 0\"\n"
        );
    }

    #[test]
    fn csv_of_nothing_is_only_the_header() {
        let csv = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Date,Transaction Type,Amount,Description\n");
    }

    #[test]
    fn pdf_spans_several_pages() {
        let bytes = render_pdf("Account Statement", "From 2024-05-01 to 2024-05-31", &sample(120))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
