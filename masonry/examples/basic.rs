// Example: balance a handful of measured heights into three columns.
use masonry::balance;

fn main() {
    let heights = [120.0, 80.0, 200.0, 60.0, 150.0, 90.0, 110.0];
    let layout = balance(&heights, 3, 10.0, 0.0).expect("three columns");

    for (i, column) in layout.columns.iter().enumerate() {
        let placed: Vec<String> = column
            .items
            .iter()
            .map(|it| format!("#{}@{}", it.index, it.top))
            .collect();
        println!("column {i}: height={} items=[{}]", column.height, placed.join(", "));
    }
    println!("grid height={}", layout.height());
}
