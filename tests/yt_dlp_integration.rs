use wena_bot::music::source::{self, Query};

#[tokio::test]
#[ignore] // Requires yt-dlp installed and network access
async fn test_resolve_youtube_url_keeps_link() {
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    let query = Query::classify(url).unwrap();
    let result = source::resolve(&query, None, "tester").await;
    assert!(result.is_ok(), "resolve failed: {:?}", result.err());
    let track = result.unwrap();
    assert!(!track.title.is_empty());
    assert_eq!(track.url, url);
    assert!(track.duration > 0);
}

#[tokio::test]
#[ignore] // Requires yt-dlp installed and network access
async fn test_resolve_search_takes_top_result() {
    let query = Query::classify("never gonna give you up rick astley").unwrap();
    let result = source::resolve(&query, None, "tester").await;
    assert!(result.is_ok(), "search failed: {:?}", result.err());
    let track = result.unwrap();
    assert!(track.url.contains("youtube.com"));
    assert_eq!(track.requester, "tester");
}
