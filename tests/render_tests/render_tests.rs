//! Render Tests
//!
//! Tests verify:
//! - Column widths follow the widest line in each column
//! - Multi-line values span several lines of one row
//! - The version row is not shown

use flatdb::render::TableRenderer;
use flatdb::Table;

fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[test]
fn test_render_single_record() {
    let mut t = Table::new("Animal", "Name, Breed");
    t.add_record(["Dog", "Corgi"]).unwrap();

    let out = TableRenderer::render(t.name(), &t.to_matrix());

    assert_eq!(
        out,
        "\nAnimal\n\n\
         |-----+------+-------|\n\
         | Key | Name | Breed |\n\
         |-----+------+-------|\n\
         | 0   | Dog  | Corgi |\n\
         |-----+------+-------|\n\n"
    );
}

#[test]
fn test_render_widens_to_longest_value() {
    let m = matrix(&[&["1.0"], &["Key", "Name"], &["0", "Minnie"], &["12", "Bo"]]);

    let out = TableRenderer::render("Pet", &m);

    assert!(out.contains("|-----+--------|\n"));
    assert!(out.contains("| Key | Name   |\n"));
    assert!(out.contains("| 12  | Bo     |\n"));
    assert!(!out.contains("1.0"));
}

#[test]
fn test_render_multi_line_value() {
    let m = matrix(&[
        &["1.0"],
        &["Key", "Name", "Address"],
        &["0", "Robyn", "XX Nilfrod Avenue\nLoughborough"],
    ]);

    let out = TableRenderer::render("Person", &m);

    assert_eq!(
        out,
        "\nPerson\n\n\
         |-----+-------+-------------------|\n\
         | Key | Name  | Address           |\n\
         |-----+-------+-------------------|\n\
         | 0   | Robyn | XX Nilfrod Avenue |\n\
         |     |       | Loughborough      |\n\
         |-----+-------+-------------------|\n\n"
    );
}

#[test]
fn test_render_counts_characters_not_bytes() {
    let m = matrix(&[&["1.0"], &["Key", "Café"], &["0", "é"]]);

    let out = TableRenderer::render("T", &m);

    assert!(out.contains("| Key | Café |\n"));
    assert!(out.contains("| 0   | é    |\n"));
}

#[test]
fn test_render_empty_table() {
    let t = Table::new("Empty", "A");

    let out = TableRenderer::render(t.name(), &t.to_matrix());

    assert_eq!(out, "\nEmpty\n\n|-----+---|\n| Key | A |\n|-----+---|\n\n");
}

#[test]
fn test_write_to_matches_render() {
    let mut t = Table::new("Animal", "Name");
    t.add_record(["Dog"]).unwrap();
    let m = t.to_matrix();

    let mut buf = Vec::new();
    TableRenderer::write_to(&mut buf, "Animal", &m).unwrap();

    assert_eq!(String::from_utf8(buf).unwrap(), TableRenderer::render("Animal", &m));
}
