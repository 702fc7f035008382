// tests/render_tests.rs
//! End-to-end rendering tests over the public API.

use resume_renderer::types::{Education, Experience, Language, Skill};
use resume_renderer::{
    compose_document, render, render_html, render_pdf, template_ids, OutputFormat, RenderOptions,
    RenderedDocument, ResumeData,
};

fn sample_resume() -> ResumeData {
    let mut data = ResumeData::default();
    data.personal.full_name = "Jane Doe".to_string();
    data.personal.title = Some("Staff Engineer".to_string());
    data.personal.email = Some("jane@example.com".to_string());
    data.personal.phone = Some("+1 555 0100".to_string());
    data.summary = Some(
        "<p>Engineer with a focus on <b>distributed systems</b> and developer tooling.</p>"
            .to_string(),
    );
    data.experience.push(Experience {
        id: "e1".to_string(),
        title: "Staff Engineer".to_string(),
        company: "Acme".to_string(),
        location: Some("Berlin".to_string()),
        start_date: "2019-03-01".to_string(),
        end_date: None,
        current: true,
        description: Some("<ul><li>Led the platform team</li><li>Cut costs 40%</li></ul>".to_string()),
        ..Default::default()
    });
    data.education.push(Education {
        id: "ed1".to_string(),
        institution: "MIT".to_string(),
        degree: "BSc".to_string(),
        field: Some("Computer Science".to_string()),
        start_date: "2010-09-01".to_string(),
        end_date: Some("2014-06-01".to_string()),
        ..Default::default()
    });
    data.skills.push(Skill {
        id: "s1".to_string(),
        name: "Rust".to_string(),
        level: Some("expert".to_string()),
    });
    data.languages.push(Language {
        id: "l1".to_string(),
        name: "German".to_string(),
        proficiency: Some("B2".to_string()),
    });
    data
}

fn arabic_resume() -> ResumeData {
    let mut data = sample_resume();
    data.personal.full_name = "أحمد خالد".to_string();
    data.personal.title = Some("مهندس برمجيات".to_string());
    data
}

#[test]
fn test_unknown_template_falls_back_to_default() {
    let data = sample_resume();
    let options = RenderOptions::default();
    let fallback = render_html(&compose_document("no-such-template", &data, &options));
    let classic = render_html(&compose_document("classic", &data, &options));
    assert_eq!(fallback, classic);
}

#[test]
fn test_every_template_renders_empty_data() {
    let data = ResumeData::default();
    let options = RenderOptions::default();
    for id in template_ids() {
        let html = render_html(&compose_document(id, &data, &options));
        assert!(html.contains("<!DOCTYPE html>"), "template {} produced no page", id);
        // Empty input must collapse to a bare page: header chrome only,
        // not a skeleton of empty sections.
        assert!(
            !html.contains("<section"),
            "template {} emitted a section for empty data",
            id
        );
        assert!(html.contains("class=\"header\""), "template {} lost the header", id);
    }
}

#[tokio::test]
async fn test_every_template_renders_empty_data_to_pdf() {
    let data = ResumeData::default();
    for id in template_ids() {
        let doc = compose_document(id, &data, &RenderOptions::default());
        let bytes = render_pdf(doc).await.expect("pdf render");
        assert!(bytes.starts_with(b"%PDF-"), "template {} produced bad magic", id);
    }
}

#[test]
fn test_every_template_renders_full_data() {
    let data = sample_resume();
    let options = RenderOptions::default();
    for id in template_ids() {
        let html = render_html(&compose_document(id, &data, &options));
        assert!(html.contains("Jane Doe"), "template {} dropped the name", id);
        assert!(html.contains("Acme"), "template {} dropped experience", id);
    }
}

#[test]
fn test_rtl_document_attributes() {
    let data = arabic_resume();
    let html = render_html(&compose_document("classic", &data, &RenderOptions::default()));
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("lang=\"ar\""));

    let ltr = render_html(&compose_document(
        "classic",
        &sample_resume(),
        &RenderOptions::default(),
    ));
    assert!(ltr.contains("dir=\"ltr\""));
    assert!(ltr.contains("lang=\"en\""));
}

#[test]
fn test_date_range_appears_formatted() {
    let html = render_html(&compose_document(
        "classic",
        &sample_resume(),
        &RenderOptions::default(),
    ));
    assert!(html.contains("Mar 2019"));
    assert!(html.contains("Present"));
}

#[test]
fn test_rich_text_markup_is_escaped_not_executed() {
    let mut data = sample_resume();
    data.summary = Some("<p>Safe <script>alert(1)</script> text</p>".to_string());
    let html = render_html(&compose_document("classic", &data, &RenderOptions::default()));
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("Safe"));
}

#[test]
fn test_html_watermark_mark_count() {
    let data = sample_resume();
    let with = render_html(&compose_document(
        "classic",
        &data,
        &RenderOptions { watermark: true },
    ));
    let without = render_html(&compose_document("classic", &data, &RenderOptions::default()));
    assert_eq!(with.matches("class=\"wm\"").count(), 5);
    assert_eq!(without.matches("class=\"wm\"").count(), 0);
}

#[test]
fn test_html_is_deterministic() {
    let data = sample_resume();
    let options = RenderOptions { watermark: true };
    let first = render_html(&compose_document("onyx", &data, &options));
    let second = render_html(&compose_document("onyx", &data, &options));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_pdf_output_for_every_template() {
    let data = sample_resume();
    for id in template_ids() {
        let doc = compose_document(id, &data, &RenderOptions::default());
        let bytes = render_pdf(doc).await.expect("pdf render");
        assert!(bytes.starts_with(b"%PDF-"), "template {} produced bad magic", id);
    }
}

#[tokio::test]
async fn test_pdf_watermark_marks() {
    let count = |bytes: &[u8]| {
        bytes
            .windows(b"PREVIEW".len())
            .filter(|w| *w == b"PREVIEW")
            .count()
    };
    let data = sample_resume();

    let doc = compose_document("classic", &data, &RenderOptions { watermark: true });
    let with = render_pdf(doc).await.expect("pdf render");
    assert!(count(&with) >= 5);
    assert_eq!(count(&with) % 5, 0);

    let doc = compose_document("classic", &data, &RenderOptions::default());
    let without = render_pdf(doc).await.expect("pdf render");
    assert_eq!(count(&without), 0);
}

#[tokio::test]
async fn test_render_facade_dispatches_both_formats() {
    let data = sample_resume();
    let options = RenderOptions::default();

    match render(&data, "horizon", OutputFormat::Html, &options).await {
        Ok(RenderedDocument::Html(html)) => assert!(html.contains("Jane Doe")),
        other => panic!("expected HTML, got {:?}", other.map(|_| "pdf")),
    }
    match render(&data, "horizon", OutputFormat::Pdf, &options).await {
        Ok(RenderedDocument::Pdf(bytes)) => assert!(bytes.starts_with(b"%PDF-")),
        other => panic!("expected PDF, got {:?}", other.map(|_| "html")),
    }
}
