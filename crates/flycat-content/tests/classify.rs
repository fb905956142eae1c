use flycat_content::media::{AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};
use flycat_content::{
    init_sanitizer, linkify, normalize_content, share_content_url, ContentNormalizer, MediaKind,
    NormalizerConfig,
};

#[test]
fn every_image_extension_is_pulled_out_of_prose() {
    for ext in IMAGE_EXTENSIONS {
        let url = format!("https://image.nostr.build/abc{ext}");
        let out = normalize_content(&format!("before {url} after"));
        assert_eq!(out.image_urls, vec![url.clone()], "ext {ext}");
        assert!(!out.modified_text.as_str().contains(&url), "ext {ext}");
        assert_eq!(out.modified_text, "before  after");
    }
}

#[test]
fn every_audio_extension_is_pulled_out_of_prose() {
    for ext in AUDIO_EXTENSIONS {
        let url = format!("https://media.example/track{ext}");
        let out = normalize_content(&format!("{url}\nnew episode"));
        assert_eq!(out.audio_urls, vec![url]);
        assert_eq!(out.modified_text, "\nnew episode");
    }
}

#[test]
fn media_urls_keep_first_seen_order() {
    let text = "https://a.io/2.png x https://a.io/v.mov y https://a.io/1.gif z https://a.io/s.wav";
    let out = normalize_content(text);
    assert_eq!(out.image_urls, vec!["https://a.io/2.png", "https://a.io/1.gif"]);
    assert_eq!(out.urls(MediaKind::Video).to_vec(), vec!["https://a.io/v.mov"]);
    assert_eq!(out.audio_urls, vec!["https://a.io/s.wav"]);
    assert_eq!(out.modified_text, " x  y  z ");
}

#[test]
fn mixed_note_keeps_links_and_drops_media() {
    let text = "new post https://blog.example/post-1 cover: https://blog.example/cover.jpg";
    let out = normalize_content(text);
    assert_eq!(out.image_urls, vec!["https://blog.example/cover.jpg"]);
    let html = out.modified_text.as_str();
    assert!(html.starts_with("new post <a "));
    assert!(html.contains(">https://blog.example/post-1</a>"));
    assert!(html.ends_with(" cover: "));
    assert_eq!(share_content_url(text), Some("https://blog.example/cover.jpg"));
}

#[test]
fn custom_config_drives_classification() {
    let config = NormalizerConfig::from_toml_str(
        r#"
[extensions]
image = [".avif"]
video = []
audio = [".opus"]
"#,
    )
    .unwrap();
    let normalizer = ContentNormalizer::new(&config);
    let out = normalizer.classify("a https://x/1.avif b https://x/2.png c https://x/3.opus");
    assert_eq!(out.image_urls, vec!["https://x/1.avif"]);
    assert!(out.video_urls.is_empty());
    assert_eq!(out.audio_urls, vec!["https://x/3.opus"]);
    assert!(out.modified_text.as_str().contains(">https://x/2.png</a>"));
}

#[test]
fn linkify_then_sanitize_matches_normalizer_output() {
    let text = "see https://nostr.how for more";
    let manual = init_sanitizer().clean(&linkify(text));
    assert_eq!(normalize_content(text).modified_text, manual);
}

#[test]
fn normalizer_is_shareable_across_threads() {
    let normalizer = std::sync::Arc::new(ContentNormalizer::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let normalizer = normalizer.clone();
            std::thread::spawn(move || normalizer.classify(&format!("t{i} https://a.io/{i}.png")))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out.image_urls, vec![format!("https://a.io/{i}.png")]);
    }
}
