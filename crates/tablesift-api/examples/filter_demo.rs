/// Filter Demo
///
/// Loads a small CSV dataset, filters it with a few queries, sorts and
/// pages the result, and exports it.
use tablesift::{Dataset, ViewConfig, Viewer};

const CITIES: &str = "\
city,country,pop,note
Beijing,CN,21.5,capital
Shanghai,CN,24.9,
Chengdu,CN,16.3,
Osaka,JP,2.7,port
Tokyo,JP,14.0,capital
Busan,KR,3.4,port
";

fn print_view(viewer: &Viewer) {
    let view = viewer.view();
    println!(
        "  query: {:?}  ({} of {} rows, page {}/{})",
        viewer.query(),
        view.filtered_rows,
        view.total_rows,
        view.page,
        view.total_pages
    );
    if let Some(error) = &view.error {
        println!("  ! {}", error);
    }
    for row in &view.rows {
        println!(
            "    {:<10} {:<3} {:>6}",
            row.get("city").unwrap_or(""),
            row.get("country").unwrap_or(""),
            row.get("pop").unwrap_or("")
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== TableSift Filter Demo ===\n");

    let dataset = Dataset::from_reader("cities.csv", CITIES.as_bytes())?;
    let config = ViewConfig::default().with_rows_per_page(3).with_strict_syntax(true);
    let mut viewer = Viewer::with_config(dataset, config);

    println!("1. Comparison with numeric coercion");
    viewer.set_query("pop > 10");
    print_view(&viewer);

    println!("\n2. Logical operators and parentheses");
    viewer.set_query("(country == 'JP' or country == 'KR') and note.isNotEmpty()");
    print_view(&viewer);

    println!("\n3. Sort by population, descending, page 2");
    viewer.set_query("");
    viewer.toggle_sort("pop");
    viewer.toggle_sort("pop");
    viewer.next_page();
    print_view(&viewer);

    println!("\n4. Syntax error keeps the data visible");
    viewer.set_query("pop >");
    print_view(&viewer);

    println!("\n5. Export");
    viewer.set_query("note.contains('cap')");
    let mut out = Vec::new();
    let written = viewer.export_csv(&mut out)?;
    println!("  {} rows -> {}", written, viewer.export_file_name());
    print!("{}", String::from_utf8_lossy(&out));

    println!("\n=== Demo Complete ===");
    Ok(())
}
