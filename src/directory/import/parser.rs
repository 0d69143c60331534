use std::collections::BTreeMap;
use std::io::Read;

/// Read a header-keyed CSV export into raw row maps. Columns and values are
/// whitespace-trimmed; everything else is left for the schema boundary.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<BTreeMap<String, String>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut row = BTreeMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), value.to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}
