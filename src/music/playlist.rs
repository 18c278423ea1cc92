use std::collections::VecDeque;

use super::Track;

/// One rendered playlist line, 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub position: usize,
    pub title: String,
    pub url: String,
}

/// Ordered tracks of one guild. The front track is the one currently playing.
///
/// `url` is the identity of a track: the playlist never holds two tracks
/// with the same url.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: VecDeque<Track>,
}

impl Playlist {
    pub fn has(&self, url: &str) -> bool {
        self.tracks.iter().any(|t| t.url == url)
    }

    /// Appends unless a track with the same url is already present.
    /// Returns the 1-based position of the new track.
    pub fn append(&mut self, track: Track) -> Option<usize> {
        if self.has(&track.url) {
            return None;
        }
        self.tracks.push_back(track);
        Some(self.tracks.len())
    }

    pub fn remove_by_url(&mut self, url: &str) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t.url == url)?;
        self.tracks.remove(index)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn front(&self) -> Option<&Track> {
        self.tracks.front()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.tracks.iter().map(|t| t.duration).sum()
    }

    pub fn render(&self) -> Vec<QueueEntry> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(i, t)| QueueEntry {
                position: i + 1,
                title: t.title.clone(),
                url: t.url.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, duration: u64) -> Track {
        Track {
            title: format!("Track {id}"),
            url: format!("https://www.youtube.com/watch?v={id}"),
            duration,
            requester: "tester".to_string(),
        }
    }

    #[test]
    fn test_append_rejects_duplicate_url() {
        let mut p = Playlist::default();
        assert_eq!(p.append(track("a", 10)), Some(1));
        assert_eq!(p.append(track("b", 10)), Some(2));
        assert_eq!(p.append(track("a", 99)), None);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_remove_by_url_keeps_order() {
        let mut p = Playlist::default();
        p.append(track("a", 1));
        p.append(track("b", 2));
        p.append(track("c", 3));

        let removed = p.remove_by_url("https://www.youtube.com/watch?v=b");
        assert_eq!(removed.map(|t| t.title), Some("Track b".to_string()));
        assert!(p.remove_by_url("https://www.youtube.com/watch?v=zzz").is_none());

        let titles: Vec<String> = p.render().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Track a", "Track c"]);
    }

    #[test]
    fn test_render_is_one_based() {
        let mut p = Playlist::default();
        p.append(track("a", 1));
        p.append(track("b", 2));

        let entries = p.render();
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[1].position, 2);
        assert_eq!(entries[1].url, "https://www.youtube.com/watch?v=b");
    }

    #[test]
    fn test_total_duration_and_clear() {
        let mut p = Playlist::default();
        p.append(track("a", 200));
        p.append(track("b", 130));
        assert_eq!(p.total_duration_secs(), 330);
        assert_eq!(p.front().map(|t| t.duration), Some(200));

        p.clear();
        assert!(p.is_empty());
        assert!(p.front().is_none());
    }
}
