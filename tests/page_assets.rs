const INDEX_HTML: &str = include_str!("../index.html");
const STYLE_CSS: &str = include_str!("../style.css");

fn rule_body<'a>(css: &'a str, selector: &str) -> Option<&'a str> {
    let start = css.find(&format!("{} {{", selector))?;
    let body = &css[start..];
    let open = body.find('{')?;
    let close = body.find('}')?;
    Some(&body[open + 1..close])
}

#[test]
fn stylesheet_is_bundled_by_the_page() {
    assert!(INDEX_HTML.contains(r#"<link data-trunk rel="css" href="style.css" />"#));
}

#[test]
fn closed_overlay_is_not_displayed() {
    let hidden = rule_body(STYLE_CSS, ".overlay.hidden").expect("no .overlay.hidden rule");
    assert!(hidden.contains("display: none"));

    let open = rule_body(STYLE_CSS, ".overlay").expect("no .overlay rule");
    assert!(open.contains("position: fixed"));
    assert!(!open.contains("display: none"));
}
