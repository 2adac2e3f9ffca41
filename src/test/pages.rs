use axum::http::StatusCode;

use super::fakes::harness;

#[tokio::test]
async fn landing_page_sections() {
    let h = harness();

    let res = h.server.get("/").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let page = res.text();
    for needle in [
        "SKILL SPRINT",
        "Event Timeline",
        "Registration Closes",
        "₹25,000",
        "₹15,000",
        "₹10,000",
        "Compulsory Internship",
        "Tech Projects Hub",
        "Frequently Asked Questions",
        r#"hx-get="/countdown""#,
    ] {
        assert!(page.contains(needle), "missing {needle}");
    }
    // everything folded by default
    assert_eq!(page.matches("faq-answer").count(), 0);
}

#[tokio::test]
async fn faq_state_comes_from_query() {
    let h = harness();

    let page = h.server.get("/").add_query_param("faq", "2").await.text();
    assert_eq!(page.matches("faq-answer").count(), 1);
    assert!(page.contains("LMS Platform Development with Company Constraints."));
    // other questions would switch to themselves
    assert!(page.contains(r#"href="/?faq=0#faq""#));

    let page = h.server.get("/").add_query_param("faq", "99").await.text();
    assert_eq!(page.matches("faq-answer").count(), 0);
}

#[tokio::test]
async fn countdown_fragment_is_bare() {
    let h = harness();

    let res = h.server.get("/countdown").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let fragment = res.text();
    assert!(fragment.contains(r#"id="countdown""#));
    assert!(!fragment.contains("<html"));
}

#[tokio::test]
async fn static_pages_render() {
    let h = harness();

    let page = h.server.get("/tracks").await.text();
    assert!(page.contains("LMS Platform Development"));
    for tool in ["React/Vue/Angular", "Node.js/Django/Laravel", "Docker"] {
        assert!(page.contains(tool));
    }

    let res = h.server.get("/about").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert!(res.text().contains("About Skill Sprint"));

    let res = h.server.get("/no-such-page").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}
