use super::*;

fn cstr(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    out.push(0);
}

fn shortcuts_doc(appid: i32, name: &str) -> Vec<u8> {
    let mut b = Vec::new();
    b.push(TYPE_MAP);
    cstr(&mut b, "shortcuts");
    b.push(TYPE_MAP);
    cstr(&mut b, "0");
    b.push(TYPE_INT32);
    cstr(&mut b, "appid");
    b.extend_from_slice(&appid.to_le_bytes());
    b.push(TYPE_STRING);
    cstr(&mut b, "AppName");
    cstr(&mut b, name);
    b.push(TYPE_MAP_END);
    b.push(TYPE_MAP_END);
    b.push(TYPE_MAP_END);
    b
}

#[test]
fn decodes_nested_maps_with_lowercased_keys() -> Result<()> {
    let root = parse(&shortcuts_doc(-1_500_000_000, "Heroic Game"))?;
    let entry = root["shortcuts"].as_map().and_then(|m| m["0"].as_map());
    let entry = entry.ok_or_else(|| anyhow!("entry missing"))?;

    assert_eq!(entry["appname"].as_str(), Some("Heroic Game"));
    assert_eq!(entry["appid"].as_u32(), Some((-1_500_000_000i32) as u32));
    Ok(())
}

#[test]
fn truncated_input_is_an_error() {
    let doc = shortcuts_doc(7, "x");
    assert!(parse(&doc[..doc.len() - 3]).is_err());
}

#[test]
fn unknown_type_tag_is_an_error() {
    let mut b = vec![0x42];
    cstr(&mut b, "k");
    assert!(parse(&b).is_err());
}

#[test]
fn shortcut_ids_are_masked_to_unsigned() -> Result<()> {
    let entries = crate::shortcuts::parse_shortcuts(&shortcuts_doc(-2, "Emulator"))?;
    assert_eq!(
        entries,
        vec![(u32::MAX.saturating_sub(1).to_string(), "Emulator".to_string())]
    );
    Ok(())
}

fn nested_maps(levels: usize) -> Vec<u8> {
    let mut b = Vec::new();
    for _ in 0..levels {
        b.push(TYPE_MAP);
        cstr(&mut b, "k");
    }
    b.extend(std::iter::repeat_n(TYPE_MAP_END, levels));
    b
}

#[test]
fn deep_nesting_is_rejected() {
    let err = parse(&nested_maps(100)).unwrap_err();
    assert!(err.to_string().contains("nested deeper than 64"));

    let err = parse(&nested_maps(100_000)).unwrap_err();
    assert!(err.to_string().contains("nested deeper"));
}

#[test]
fn nesting_up_to_the_limit_is_accepted() -> Result<()> {
    let root = parse(&nested_maps(MAX_DEPTH))?;
    assert!(root["k"].as_map().is_some());
    Ok(())
}
