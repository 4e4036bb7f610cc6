//! Fixed-width table rendering for evaluation results.

/// Renders `matrix` with column and row headers, right-aligned, values
/// printed with `precision` decimal places.
///
/// Missing cells (short rows) render as blanks.
pub fn render_table(
    matrix: &[Vec<f64>],
    columns: &[String],
    rows: &[String],
    precision: usize,
) -> String {
    let cells: Vec<Vec<String>> = matrix
        .iter()
        .map(|row| row.iter().map(|v| format!("{:.*}", precision, v)).collect())
        .collect();

    let label_width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let col_widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(j, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(j))
                .map(|c| c.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut header = " ".repeat(label_width);
    for (name, width) in columns.iter().zip(&col_widths) {
        header.push_str(&format!(" | {:>width$}", name, width = *width));
    }
    lines.push(header);

    for (i, label) in rows.iter().enumerate() {
        let mut line = format!("{:<width$}", label, width = label_width);
        for (j, width) in col_widths.iter().enumerate() {
            let cell = cells.get(i).and_then(|r| r.get(j)).map(String::as_str).unwrap_or("");
            line.push_str(&format!(" | {:>width$}", cell, width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}
