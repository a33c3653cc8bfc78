//! Article parser integration tests.
//!
//! End-to-end behavior of `marticle::parse` / `parse_article`: component
//! order, splitting, list aggregation, media resolution and fallbacks.

use std::collections::HashMap;

use marticle::model::{IMAGE_FALLBACK_HTML, VIDEO_FALLBACK_HTML};
use marticle::{
    ArticleData, ArticleParser, HeadingStyle, ImageSource, ListRow, MarkdownOptions,
    MarticleComponent, MediaMaps, NumberedListRow, VideoSource, VideoType,
};
use proptest::prelude::*;

const ARTICLE_HTML: &str = include_str!("fixtures/article.html");
const ARTICLE_JSON: &str = include_str!("fixtures/article.json");

fn bullet(level: u32, content: &str) -> ListRow {
    ListRow {
        level,
        content: content.to_string(),
    }
}

fn numbered(level: u32, index: u32, content: &str) -> NumberedListRow {
    NumberedListRow {
        level,
        content: content.to_string(),
        index,
    }
}

fn image_maps(id: &str, source: ImageSource) -> MediaMaps {
    MediaMaps {
        images: HashMap::from([(id.to_string(), source)]),
        videos: HashMap::new(),
    }
}

fn image_source(src: &str) -> ImageSource {
    ImageSource {
        src: Some(src.to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Ordering and Splitting
// ============================================================================

#[test]
fn test_order_preservation() {
    assert_eq!(
        marticle::parse("<p>A</p><h1>B</h1><p>C</p>"),
        vec![
            MarticleComponent::text("A"),
            MarticleComponent::heading("# B", 1),
            MarticleComponent::text("C"),
        ]
    );
}

#[test]
fn test_empty_input() {
    assert!(marticle::parse("").is_empty());
    assert!(marticle::parse("   \n  ").is_empty());
}

#[test]
fn test_empty_paragraph_is_suppressed() {
    assert!(marticle::parse("<p></p>").is_empty());
    assert!(marticle::parse("<p> <br> </p>").is_empty());
}

#[test]
fn test_paragraph_with_only_placeholder_yields_no_text() {
    let media = image_maps("1", image_source("https://example.com/a.jpg"));
    let out = ArticleParser::default().parse_with_media("<p><!--IMG_1--></p>", &media, None);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].typename(), "Image");
}

#[test]
fn test_text_around_placeholder_is_split() {
    let out = marticle::parse("<p>Before <!--IMG_4--> after</p>");
    assert_eq!(
        out,
        vec![
            MarticleComponent::text("Before"),
            MarticleComponent::unsupported(IMAGE_FALLBACK_HTML),
            MarticleComponent::text("after"),
        ]
    );
}

#[test]
fn test_blockquote_paragraphs() {
    assert_eq!(
        marticle::parse("<blockquote><p>One</p><p>Two</p></blockquote>"),
        vec![
            MarticleComponent::blockquote("One"),
            MarticleComponent::blockquote("Two"),
        ]
    );
}

#[test]
fn test_div_inside_blockquote_stays_text() {
    assert_eq!(
        marticle::parse("<blockquote><div>Said</div></blockquote>"),
        vec![MarticleComponent::text("Said")]
    );
}

#[test]
fn test_unknown_tags_are_transparent() {
    assert_eq!(
        marticle::parse("<section><article><span>deep <b>text</b></span></article></section>"),
        vec![MarticleComponent::text("deep **text**")]
    );
}

#[test]
fn test_inline_markdown() {
    assert_eq!(
        marticle::parse(r#"<p>See <a href="https://example.com/doc">the docs</a> or <code>man 1 ls</code>.</p>"#),
        vec![MarticleComponent::text(
            "See [the docs](https://example.com/doc) or `man 1 ls`."
        )]
    );
}

#[test]
fn test_link_emptied_by_media_extraction() {
    let media = image_maps("2", image_source("https://example.com/b.jpg"));
    let out = ArticleParser::default().parse_with_media(
        r#"<p>Photo: <a href="https://example.com/full"><!--IMG_2--></a></p>"#,
        &media,
        None,
    );

    assert_eq!(out.len(), 2);
    assert_eq!(out[0], MarticleComponent::text("Photo:"));
    match &out[1] {
        MarticleComponent::Image { target_url, .. } => {
            assert_eq!(target_url.as_deref(), Some("https://example.com/full"));
        }
        other => panic!("expected image, got {other:?}"),
    }
}

// ============================================================================
// Atomic Components
// ============================================================================

#[test]
fn test_heading_levels() {
    let out = marticle::parse("<h1>a</h1><h2>b</h2><h3>c</h3><h4>d</h4><h5>e</h5><h6>f</h6>");
    let levels: Vec<_> = out
        .iter()
        .map(|c| match c {
            MarticleComponent::Heading { level, .. } => *level,
            other => panic!("expected heading, got {other:?}"),
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(out[5], MarticleComponent::heading("###### f", 6));
}

#[test]
fn test_setext_headings() {
    let parser =
        ArticleParser::new(MarkdownOptions::default().with_heading_style(HeadingStyle::Setext));
    assert_eq!(
        parser.parse("<h1>Title</h1>"),
        vec![MarticleComponent::heading("Title\n=====", 1)]
    );
}

#[test]
fn test_divider_table_and_code() {
    assert_eq!(
        marticle::parse("<hr><table><tr><td>1</td></tr></table><pre><code>let x = 1;</code></pre>"),
        vec![
            MarticleComponent::divider(),
            MarticleComponent::Table {
                html: "<table><tbody><tr><td>1</td></tr></tbody></table>".to_string()
            },
            MarticleComponent::CodeBlock {
                text: "let x = 1;".to_string()
            },
        ]
    );
}

#[test]
fn test_unsupported_tag_isolation() {
    assert_eq!(
        marticle::parse("<script>alert(1)</script>"),
        vec![MarticleComponent::unsupported("<script>alert(1)</script>")]
    );
}

#[test]
fn test_every_unsupported_tag() {
    let html = "<dl><dt>t</dt></dl><audio></audio><iframe></iframe><math></math>\
                <details></details><dialog></dialog><menu></menu>";
    let out = marticle::parse(html);
    assert_eq!(out.len(), 7);
    assert!(out.iter().all(|c| c.typename() == "UnMarseable"));
}

#[test]
fn test_unsupported_inside_paragraph_splits_it() {
    assert_eq!(
        marticle::parse("<p>x <iframe src=\"https://e.com\"></iframe> y</p>"),
        vec![
            MarticleComponent::text("x"),
            MarticleComponent::unsupported(r#"<iframe src="https://e.com"></iframe>"#),
            MarticleComponent::text("y"),
        ]
    );
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_list_same_type() {
    assert_eq!(
        marticle::parse("<ul><li>Coffee</li><li>Tea</li></ul>"),
        vec![MarticleComponent::BulletedList {
            rows: vec![bullet(0, "Coffee"), bullet(0, "Tea")]
        }]
    );
}

#[test]
fn test_list_type_switch() {
    let html = "<ul><li>Coffee</li><li>Tea<ol><li>BlackTea</li><li>GreenTea</li></ol></li><li>Milk</li></ul>";
    assert_eq!(
        marticle::parse(html),
        vec![
            MarticleComponent::BulletedList {
                rows: vec![bullet(0, "Coffee"), bullet(0, "Tea")]
            },
            MarticleComponent::NumberedList {
                rows: vec![numbered(1, 0, "BlackTea"), numbered(1, 1, "GreenTea")]
            },
            MarticleComponent::BulletedList {
                rows: vec![bullet(0, "Milk")]
            },
        ]
    );
}

#[test]
fn test_numbered_index_continuity_across_interruption() {
    let out = marticle::parse("<ol><li>one</li><li>two<h1>Break</h1></li><li>three</li></ol>");
    assert_eq!(
        out,
        vec![
            MarticleComponent::NumberedList {
                rows: vec![numbered(0, 0, "one"), numbered(0, 1, "two")]
            },
            MarticleComponent::heading("# Break", 1),
            MarticleComponent::NumberedList {
                rows: vec![numbered(0, 2, "three")]
            },
        ]
    );
}

#[test]
fn test_deep_same_type_nesting_levels() {
    let out = marticle::parse("<ol><li>a<ol><li>b<ol><li>c</li></ol></li></ol></li></ol>");
    assert_eq!(
        out,
        vec![MarticleComponent::NumberedList {
            rows: vec![numbered(0, 0, "a"), numbered(1, 0, "b"), numbered(2, 0, "c")]
        }]
    );
}

#[test]
fn test_list_item_inline_formatting() {
    assert_eq!(
        marticle::parse(r#"<ul><li><a href="https://e.com">Link</a> and <em>more</em></li></ul>"#),
        vec![MarticleComponent::BulletedList {
            rows: vec![bullet(0, "[Link](https://e.com) and _more_")]
        }]
    );
}

#[test]
fn test_list_between_paragraphs() {
    assert_eq!(
        marticle::parse("<p>Before</p><ul><li>x</li></ul><p>After</p>"),
        vec![
            MarticleComponent::text("Before"),
            MarticleComponent::BulletedList {
                rows: vec![bullet(0, "x")]
            },
            MarticleComponent::text("After"),
        ]
    );
}

// ============================================================================
// Media
// ============================================================================

#[test]
fn test_media_fallback_without_entry() {
    assert_eq!(
        marticle::parse("<!--IMG_9-->"),
        vec![MarticleComponent::unsupported(IMAGE_FALLBACK_HTML)]
    );
    assert_eq!(
        marticle::parse("<!--VIDEO_9-->"),
        vec![MarticleComponent::unsupported(VIDEO_FALLBACK_HTML)]
    );

    let media = image_maps("1", image_source("https://example.com/a.jpg"));
    assert_eq!(
        ArticleParser::default().parse_with_media("<!--IMG_9-->", &media, None),
        vec![MarticleComponent::unsupported(IMAGE_FALLBACK_HTML)]
    );
}

#[test]
fn test_media_fallback_on_bad_src() {
    for src in ["", "   ", "https://a.com/1.jpg https://a.com/2.jpg", "not a url"] {
        let media = image_maps("9", image_source(src));
        assert_eq!(
            ArticleParser::default().parse_with_media("<!--IMG_9-->", &media, None),
            vec![MarticleComponent::unsupported(IMAGE_FALLBACK_HTML)],
            "src {src:?}"
        );
    }

    let media = image_maps("9", ImageSource::default());
    assert_eq!(
        ArticleParser::default().parse_with_media("<!--IMG_9-->", &media, None),
        vec![MarticleComponent::unsupported(IMAGE_FALLBACK_HTML)]
    );
}

#[test]
fn test_image_resolution() {
    let media = image_maps(
        "3",
        ImageSource {
            src: Some("https://example.com/cat.jpg".to_string()),
            width: Some(640),
            height: None,
            caption: Some("A cat".to_string()),
            credit: None,
        },
    );

    assert_eq!(
        ArticleParser::default().parse_with_media("<!-- IMG_3 -->", &media, None),
        vec![MarticleComponent::Image {
            image_id: 3,
            width: Some(640),
            height: None,
            src: "https://example.com/cat.jpg".to_string(),
            target_url: None,
            caption: Some("A cat".to_string()),
            credit: None,
        }]
    );
}

#[test]
fn test_relative_src_resolves_against_given_url() {
    let media = image_maps("1", image_source("../img/a.png"));
    let out = ArticleParser::default().parse_with_media(
        "<!--IMG_1-->",
        &media,
        Some("https://example.com/blog/post/"),
    );

    match &out[..] {
        [MarticleComponent::Image { src, .. }] => {
            assert_eq!(src, "https://example.com/blog/img/a.png");
        }
        other => panic!("expected one image, got {other:?}"),
    }
}

#[test]
fn test_absolute_src_passes_through_unchanged() {
    let src = "https://CDN.example.com/caf\u{e9}.jpg?w=640";
    let media = image_maps("1", image_source(src));
    let out = ArticleParser::default().parse_with_media(
        "<!--IMG_1-->",
        &media,
        Some("https://example.com/blog/post/"),
    );

    match &out[..] {
        [MarticleComponent::Image { src: resolved, .. }] => assert_eq!(resolved, src),
        other => panic!("expected one image, got {other:?}"),
    }
}

#[test]
fn test_protocol_relative_src_without_given_url() {
    let media = image_maps("1", image_source("//cdn.example.com/a.png"));
    let out = ArticleParser::default().parse_with_media("<!--IMG_1-->", &media, None);

    match &out[..] {
        [MarticleComponent::Image { src, .. }] => assert_eq!(src, "https://cdn.example.com/a.png"),
        other => panic!("expected one image, got {other:?}"),
    }
}

#[test]
fn test_parse_article_with_builders() {
    let article = ArticleData::new("<p>Intro</p><!--IMG_5-->")
        .with_media(image_maps("5", image_source("photos/5.jpg")))
        .with_given_url("https://example.com/stories/one.html");

    let out = marticle::parse_article(&article);
    assert_eq!(out[0], MarticleComponent::text("Intro"));
    match &out[1] {
        MarticleComponent::Image { image_id, src, .. } => {
            assert_eq!(*image_id, 5);
            assert_eq!(src, "https://example.com/stories/photos/5.jpg");
        }
        other => panic!("expected image, got {other:?}"),
    }
}

#[test]
fn test_video_resolution_keeps_unknown_type() {
    let mut media = MediaMaps::default();
    media.videos.insert(
        "1".to_string(),
        VideoSource {
            src: Some("https://vimeo.com/1".to_string()),
            vid: Some("1".to_string()),
            type_code: Some(2),
            ..Default::default()
        },
    );
    media.videos.insert(
        "2".to_string(),
        VideoSource {
            src: Some("https://vimeo.com/2".to_string()),
            type_code: Some(42),
            ..Default::default()
        },
    );
    media.videos.insert(
        "3".to_string(),
        VideoSource {
            src: Some("https://youtube.com/x".to_string()),
            ..Default::default()
        },
    );

    let out = ArticleParser::default().parse_with_media(
        "<!--VIDEO_1--><!--VIDEO_2--><!--VIDEO_3-->",
        &media,
        None,
    );
    assert_eq!(
        out,
        vec![
            MarticleComponent::Video {
                video_id: 1,
                width: None,
                height: None,
                src: "https://vimeo.com/1".to_string(),
                vid: Some("1".to_string()),
                length: None,
                video_type: Some(VideoType::VimeoLink),
            },
            MarticleComponent::Video {
                video_id: 2,
                width: None,
                height: None,
                src: "https://vimeo.com/2".to_string(),
                vid: None,
                length: None,
                video_type: None,
            },
            MarticleComponent::Video {
                video_id: 3,
                width: None,
                height: None,
                src: "https://youtube.com/x".to_string(),
                vid: None,
                length: None,
                video_type: None,
            },
        ]
    );
}

#[test]
fn test_plain_comments_are_ignored() {
    assert_eq!(
        marticle::parse("<!-- generated by cms --><p>Body</p>"),
        vec![MarticleComponent::text("Body")]
    );
}

// ============================================================================
// Full Article
// ============================================================================

#[test]
fn test_fixture_article() {
    let article = ArticleData::from_json(ARTICLE_JSON).unwrap();
    let out = marticle::parse_article(&article);

    let typenames: Vec<_> = out.iter().map(MarticleComponent::typename).collect();
    assert_eq!(
        typenames,
        vec![
            "MarticleHeading",
            "MarticleText",
            "Image",
            "MarticleText",
            "MarticleBulletedList",
            "MarticleNumberedList",
            "MarticleBulletedList",
            "MarticleBlockquote",
            "MarticleHeading",
            "MarticleTable",
            "MarticleDivider",
            "MarticleCodeBlock",
            "MarticleText",
            "Video",
            "UnMarseable",
        ]
    );

    assert_eq!(
        out[1],
        MarticleComponent::text(
            "Cities that tore out their streetcar lines in the _1950s_ are quietly putting them back."
        )
    );
    assert_eq!(
        out[2],
        MarticleComponent::Image {
            image_id: 1,
            width: Some(1200),
            height: Some(800),
            src: "https://news.example.com/media/tram.jpg".to_string(),
            target_url: None,
            caption: Some("A tram in Tucson".to_string()),
            credit: Some("City of Tucson".to_string()),
        }
    );
    assert_eq!(
        out[4],
        MarticleComponent::BulletedList {
            rows: vec![
                bullet(0, "Lower operating costs per rider"),
                bullet(0, "Predictable routes"),
            ]
        }
    );
    assert_eq!(
        out[5],
        MarticleComponent::NumberedList {
            rows: vec![numbered(1, 0, "Fixed rails"), numbered(1, 1, "Fixed stops")]
        }
    );
    assert_eq!(
        out[7],
        MarticleComponent::blockquote("\u{201c}Nobody misses the bus.\u{201d}")
    );
    assert_eq!(out[12], MarticleComponent::text("Watch the opening ride:"));
    assert_eq!(
        out[13],
        MarticleComponent::Video {
            video_id: 1,
            width: Some(640),
            height: Some(360),
            src: "https://www.youtube.com/watch?v=abc123".to_string(),
            vid: Some("abc123".to_string()),
            length: Some(95),
            video_type: Some(VideoType::Youtube),
        }
    );
}

#[test]
fn test_fixture_without_media_context() {
    let out = marticle::parse(ARTICLE_HTML);
    assert_eq!(out[2], MarticleComponent::unsupported(IMAGE_FALLBACK_HTML));
    assert_eq!(out[13], MarticleComponent::unsupported(VIDEO_FALLBACK_HTML));
}

#[test]
fn test_serialized_output_shape() {
    let out = marticle::parse("<h2>Hi</h2><ol><li>x</li></ol>");
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"__typename": "MarticleHeading", "content": "## Hi", "level": 2},
            {"__typename": "MarticleNumberedList", "rows": [{"level": 0, "content": "x", "index": 0}]}
        ])
    );
}

// ============================================================================
// Idempotence and Robustness
// ============================================================================

#[test]
fn test_idempotence_on_fixture() {
    assert_eq!(marticle::parse(ARTICLE_HTML), marticle::parse(ARTICLE_HTML));
}

#[test]
fn test_malformed_markup_does_not_panic() {
    for html in [
        "<p><ul><li>a</p></li>",
        "</div></div><p>x",
        "<table><p>inside</p><tr><td>a",
        "<li>orphan</li><ol>",
        "<!--IMG_--><!--VIDEO_x-->",
        "<blockquote><ol><li><blockquote>q</blockquote></li></ol>",
    ] {
        let _ = marticle::parse(html);
    }
}

fn markup_strategy() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<div>".to_string()),
        Just("</div>".to_string()),
        Just("<ul>".to_string()),
        Just("<ol>".to_string()),
        Just("</ul>".to_string()),
        Just("</ol>".to_string()),
        Just("<li>".to_string()),
        Just("</li>".to_string()),
        Just("<blockquote>".to_string()),
        Just("</blockquote>".to_string()),
        Just("<h2>".to_string()),
        Just("</h2>".to_string()),
        Just("<hr>".to_string()),
        Just("<br>".to_string()),
        Just("<em>".to_string()),
        Just("</em>".to_string()),
        Just("<a href=\"https://e.com\">".to_string()),
        Just("</a>".to_string()),
        Just("<!--IMG_1-->".to_string()),
        Just("<script>x</script>".to_string()),
        "[a-z *_#>-]{0,8}",
    ];
    prop::collection::vec(token, 0..24).prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(html in markup_strategy()) {
        prop_assert_eq!(marticle::parse(&html), marticle::parse(&html));
    }

    #[test]
    fn prop_no_empty_text_components(html in markup_strategy()) {
        for component in marticle::parse(&html) {
            match component {
                MarticleComponent::Text { content } | MarticleComponent::Blockquote { content } => {
                    prop_assert!(!content.is_empty());
                }
                MarticleComponent::BulletedList { rows } => {
                    prop_assert!(!rows.is_empty());
                    prop_assert!(rows.iter().all(|r| !r.content.is_empty()));
                }
                MarticleComponent::NumberedList { rows } => {
                    prop_assert!(!rows.is_empty());
                    prop_assert!(rows.iter().all(|r| !r.content.is_empty()));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn prop_arbitrary_text_never_panics(html in "\\PC{0,200}") {
        let _ = marticle::parse(&html);
    }
}
