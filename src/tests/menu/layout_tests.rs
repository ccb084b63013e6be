use super::*;

fn row(values: &[&str], width: usize) -> String {
    let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    layout_row(&values, width)
}

#[test]
fn truncation_keeps_the_suffix() {
    let value = "abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMN";
    assert_eq!(value.len(), 50);
    assert_eq!(truncate_tail(value, 10), "EFGHIJKLMN");
    assert_eq!(truncate_tail("short", 10), "short");
    assert_eq!(truncate_tail("abc", 0), "");
}

#[test]
fn single_field_is_left_justified_and_suffix_truncated() {
    assert_eq!(row(&["GE-Proton9-20"], 16), "GE-Proton9-20   ");
    let long = "x".repeat(40) + "0123456789";
    assert_eq!(row(&[&long], 10), "0123456789");
}

#[test]
fn first_field_uses_fixed_id_column_and_last_is_right_justified() {
    let out = row(&["Proton 9.0", "/steam/common/Proton 9.0"], 60);
    assert_eq!(out.chars().count(), 60);
    assert_eq!(&out[..24], "Proton 9.0              ");
    assert!(out.ends_with("/steam/common/Proton 9.0"));
    assert_eq!(out[24..].trim_start(), "/steam/common/Proton 9.0");
}

#[test]
fn long_trailing_path_keeps_its_final_segment() {
    let path = "/home/user/.steam/root/steamapps/compatdata/12210";
    let out = row(&["12210", path], 34);
    assert_eq!(out.chars().count(), 34);
    assert_eq!(&out[..24], format!("{:<24}", "12210"));
    assert_eq!(&out[24..], "data/12210");
}

#[test]
fn three_fields_fill_exact_width() {
    let out = row(&["12210", "GTA IV", "/compatdata/12210"], 70);
    assert_eq!(out.chars().count(), 70);
    assert!(out.starts_with("12210                   GTA IV "));
    assert!(out.ends_with("/compatdata/12210"));
}

#[test]
fn middle_field_leaves_room_for_last() {
    let name = "A".repeat(100);
    let out = row(&["1", &name, "/p"], 40);
    assert_eq!(out.chars().count(), 40);
    assert!(out.ends_with(" /p"));
}

#[test]
fn wide_characters_truncate_by_display_width() {
    assert_eq!(truncate_tail("ファイナル", 5), "ナル");
    assert_eq!(truncate_tail("ファイナル", 4), "ナル");
    assert_eq!(truncate_tail("aファ", 5), "aファ");
}

#[test]
fn wide_middle_field_keeps_the_trailing_path() {
    let out = row(&["1234", "ファイナルファンタジー", "/compatdata/1234"], 46);
    assert_eq!(UnicodeWidthStr::width(out.as_str()), 46);
    assert!(out.starts_with(&format!("{:<24}", "1234")));
    assert!(out.contains("ジー"));
    assert!(out.ends_with("/compatdata/1234"));
}

#[test]
fn wide_middle_field_uses_natural_width_when_room_allows() {
    let out = row(&["1234", "ファイナルファンタジー", "/c/1234"], 70);
    assert_eq!(UnicodeWidthStr::width(out.as_str()), 70);
    assert!(out.contains("ファイナルファンタジー "));
    assert!(out.ends_with("/c/1234"));
}
