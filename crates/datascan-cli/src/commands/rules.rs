//! Rules command - list the built-in validation rules.

use comfy_table::Cell;

use datascan::default_rules;

use super::new_table;

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rules = default_rules();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    let mut table = new_table(["Id", "Name", "Kind", "Severity", "Enabled", "Description"]);
    for rule in &rules {
        let kind = serde_json::to_value(rule.kind())?;
        table.add_row(vec![
            Cell::new(rule.id()),
            Cell::new(&rule.name),
            Cell::new(kind.as_str().unwrap_or_default()),
            Cell::new(rule.severity),
            Cell::new(if rule.enabled { "yes" } else { "no" }),
            Cell::new(&rule.description),
        ]);
    }
    println!("{table}");

    Ok(())
}
