use resume_render::style::Rgb;
use resume_render::{classify_text, LayoutBuilder, LineCategory, StyleTable};

fn classify_pairs(text: &str) -> Vec<(LineCategory, String)> {
    classify_text(text)
        .into_iter()
        .map(|line| (line.category(), line.text().to_owned()))
        .collect()
}

#[test]
fn resume_header_and_experience_block() {
    let text = "JOHN SMITH\njohn@example.com | +1-555-0100\nexperience\nSenior Engineer\nAcme Corp | 2019-2022\nMarch 2020 - Present\n- Led team of 5 engineers";

    assert_eq!(
        classify_pairs(text),
        vec![
            (LineCategory::Name, "JOHN SMITH".to_owned()),
            (
                LineCategory::Contact,
                "john@example.com | +1-555-0100".to_owned()
            ),
            (LineCategory::SectionHeading, "EXPERIENCE".to_owned()),
            (LineCategory::JobTitle, "Senior Engineer".to_owned()),
            (LineCategory::Company, "Acme Corp | 2019-2022".to_owned()),
            (LineCategory::Date, "March 2020 - Present".to_owned()),
            (
                LineCategory::Bullet,
                "• Led team of 5 engineers".to_owned()
            ),
        ]
    );
}

#[test]
fn headings_carry_a_framed_style_through_layout() {
    let lines = classify_text("JANE DOE\n\nSkills");
    let document = LayoutBuilder::new().build(&lines, &StyleTable::resume());

    let heading = &document.blocks()[2];
    assert_eq!(heading.category(), LineCategory::SectionHeading);
    assert_eq!(heading.text(), Some("SKILLS"));

    let style = StyleTable::resume()
        .style_for(LineCategory::SectionHeading)
        .to_owned();
    let border = style.border.expect("headings are framed");
    assert_eq!(border.color, Rgb::DARK_BLUE);
    assert_eq!(border.background, Rgb::LIGHT_GREY);
}

#[test]
fn repeated_classification_is_stable() {
    let text = "JANE DOE\nProduct Lead\nGlobex Inc\n2015 - 2018\nShipped things";
    let first: Vec<_> = classify_pairs(text);
    for _ in 0..3 {
        assert_eq!(classify_pairs(text), first);
    }
}
