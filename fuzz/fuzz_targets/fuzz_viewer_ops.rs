#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tablesift::{Dataset, ViewConfig, Viewer};

#[derive(Arbitrary, Debug)]
enum ViewerOp {
    Query(String),
    Sort(u8),
    Page(u8),
    Export,
}

#[derive(Arbitrary, Debug)]
struct Input {
    csv: String,
    strict: bool,
    rows_per_page: u8,
    ops: Vec<ViewerOp>,
}

fuzz_target!(|input: Input| {
    if input.csv.len() > 4096 {
        return;
    }
    let Ok(dataset) = Dataset::from_reader("fuzz.csv", input.csv.as_bytes()) else {
        return;
    };
    let headers = dataset.headers.clone();

    let config = ViewConfig::default()
        .with_rows_per_page(input.rows_per_page as usize)
        .with_strict_syntax(input.strict);
    let mut viewer = Viewer::with_config(dataset, config);

    for op in input.ops.iter().take(50) {
        match op {
            ViewerOp::Query(query) => {
                if query.len() <= 1024 {
                    viewer.set_query(query.as_str());
                }
            }
            ViewerOp::Sort(column) => {
                if let Some(key) = headers.get(*column as usize) {
                    viewer.toggle_sort(key);
                }
            }
            ViewerOp::Page(page) => {
                viewer.set_page(*page as usize);
            }
            ViewerOp::Export => {
                let _ = viewer.export_csv(std::io::sink());
            }
        }
        let _ = viewer.view();
    }
});
