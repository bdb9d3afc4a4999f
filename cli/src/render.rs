use chrono::NaiveDate;
use planner_core::{CheckItem, DayEntry, DayRecord, MonthOverview, MAX_SLEEP_HOURS, WATER_GLASSES};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Checklist")]
    checklist: String,
    #[tabled(rename = "Vitamins")]
    vitamins: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Sleep (h)")]
    sleep: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

pub fn water_bar(water: u8) -> String {
    (0..WATER_GLASSES)
        .map(|i| if i < water { '●' } else { '○' })
        .collect()
}

fn render_items(out: &mut String, items: &[CheckItem]) {
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let mark = if item.done { 'x' } else { ' ' };
        out.push_str(&format!("  [{}] {}\n", mark, item.text));
    }
}

pub fn render_record(date: NaiveDate, record: &DayRecord) -> String {
    let mut out = format!("Planner - {} ({})\n\n", date.format("%Y-%m-%d"), date.format("%A"));

    out.push_str("Checklist\n");
    render_items(&mut out, &record.checklist);

    out.push_str(&format!(
        "\nWater Tracker\n  {} {}/{}\n",
        water_bar(record.water),
        record.water,
        WATER_GLASSES
    ));

    out.push_str("\nMultivitamins\n");
    render_items(&mut out, &record.vitamins);

    let sleep = if record.sleep == 0 {
        "-".to_string()
    } else {
        format!("{}/{}", record.sleep, MAX_SLEEP_HOURS)
    };
    out.push_str(&format!("\nHours of Sleep\n  {}\n", sleep));

    out.push_str("\nNotes\n");
    if record.notes.is_empty() {
        out.push_str("  (none)\n");
    }
    for line in record.notes.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

pub fn render_month(overview: &MonthOverview) -> String {
    if overview.days.is_empty() {
        return format!("No records for {:04}-{:02}.", overview.year, overview.month);
    }

    let rows: Vec<DayRow> = overview
        .days
        .iter()
        .map(|(date, entry)| {
            let date = format!("{} ({})", date.format("%Y-%m-%d"), date.format("%a"));
            match entry {
                DayEntry::Summary(s) => DayRow {
                    date,
                    checklist: format!("{}/{}", s.checklist_done, s.checklist_total),
                    vitamins: format!("{}/{}", s.vitamins_done, s.vitamins_total),
                    water: format!("{}/{}", s.water, WATER_GLASSES),
                    sleep: if s.sleep == 0 { "-".to_string() } else { s.sleep.to_string() },
                    notes: if s.has_notes { "yes".to_string() } else { "-".to_string() },
                },
                DayEntry::Corrupt(reason) => DayRow {
                    date,
                    checklist: "corrupt".to_string(),
                    vitamins: "-".to_string(),
                    water: "-".to_string(),
                    sleep: "-".to_string(),
                    notes: reason.clone(),
                },
                DayEntry::Unreadable(reason) => DayRow {
                    date,
                    checklist: "unreadable".to_string(),
                    vitamins: "-".to_string(),
                    water: "-".to_string(),
                    sleep: "-".to_string(),
                    notes: reason.clone(),
                },
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{DaySummary, ListKind};
    use std::collections::BTreeMap;

    #[test]
    fn test_water_bar() {
        assert_eq!(water_bar(0), "○○○○○○○○");
        assert_eq!(water_bar(3), "●●●○○○○○");
        assert_eq!(water_bar(8), "●●●●●●●●");
    }

    #[test]
    fn test_render_record() {
        let mut record = DayRecord::default();
        record.add_item(ListKind::Checklist, "Buy milk", true);
        record.water = 2;
        record.sleep = 6;
        record.notes = "line one\nline two".into();
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let out = render_record(date, &record);
        assert!(out.starts_with("Planner - 2025-06-15 (Sunday)"));
        assert!(out.contains("  [x] Buy milk\n"));
        assert!(out.contains("  [ ] Omega 3 Fatty Acid\n"));
        assert!(out.contains("●●○○○○○○ 2/8"));
        assert!(out.contains("Hours of Sleep\n  6/8\n"));
        assert!(out.contains("  line two\n"));
    }

    #[test]
    fn test_render_empty_month() {
        let overview = MonthOverview { year: 2025, month: 2, days: BTreeMap::new() };
        assert_eq!(render_month(&overview), "No records for 2025-02.");
    }

    #[test]
    fn test_render_month_rows() {
        let mut days = BTreeMap::new();
        days.insert(
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            DayEntry::Summary(DaySummary { checklist_done: 1, checklist_total: 3, water: 4, ..DaySummary::default() }),
        );
        days.insert(NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(), DayEntry::Corrupt("EOF".into()));
        days.insert(
            NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
            DayEntry::Unreadable("permission denied".into()),
        );
        let out = render_month(&MonthOverview { year: 2025, month: 2, days });

        assert!(out.contains("2025-02-03 (Mon)"));
        assert!(out.contains("1/3"));
        assert!(out.contains("4/8"));
        assert!(out.contains("corrupt"));
        assert!(out.contains("unreadable"));
    }
}
