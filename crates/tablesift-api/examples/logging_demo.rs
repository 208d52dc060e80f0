use tablesift::logging::LogConfig;
use tablesift::sql::{is_aggregate_result, load_statements};
use tablesift::{Dataset, Viewer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows parse misses and filter statistics; try RUST_LOG=trace
    // to see every logical split as well.
    let _guard = LogConfig::debug().init();

    println!("=== TableSift Logging Demo ===\n");

    let csv = "name,age\nAnn,31\nBob,9\nCy,45\n";
    let dataset = Dataset::from_reader("people.csv", csv.as_bytes())?;

    println!("1. Preparing SQL statements...");
    for statement in load_statements("people", &dataset) {
        println!("   {}", statement);
    }
    println!(
        "   aggregate? {}",
        is_aggregate_result("SELECT COUNT(*) FROM people", 1)
    );

    let mut viewer = Viewer::new(dataset);

    println!("\n2. Filtering...");
    viewer.set_query("age > 20 and name != 'Cy'");
    println!("   {} rows", viewer.view().filtered_rows);

    println!("\n3. Unrecognized query (logged, filter disabled)...");
    viewer.set_query("age is big");
    println!("   {} rows", viewer.view().filtered_rows);

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");

    Ok(())
}
