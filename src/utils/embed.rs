use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::music::queue::QueueView;
use crate::music::Track;

/// Entries shown in the queue embed; the description has a size limit.
const MAX_LISTED: usize = 20;

pub fn now_playing(track: &Track) -> CreateEmbed {
    CreateEmbed::new()
        .title("🎵 Now playing")
        .description(format!("[{}]({})", track.title, track.url))
        .field("Duration", track.duration_label(), true)
        .field("Requested by", &track.requester, true)
        .color(0x1DB954)
}

pub fn added_to_queue(track: &Track, position: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ Added to the queue")
        .description(format!("[{}]({})", track.title, track.url))
        .field("Duration", track.duration_label(), true)
        .field("Position", format!("#{position}"), true)
        .color(0x5865F2)
}

pub fn queue_list(view: &QueueView) -> CreateEmbed {
    let mut description = String::new();

    for entry in view.entries.iter().take(MAX_LISTED) {
        description.push_str(&format!(
            "{}. **[{}]({})**\n",
            entry.position, entry.title, entry.url
        ));
    }

    let hidden = view.entries.len().saturating_sub(MAX_LISTED);
    if hidden > 0 {
        description.push_str(&format!("…and {hidden} more\n"));
    }

    description.push_str(&format!(
        "\nTotal duration: {} minutes approximately.",
        view.total_minutes()
    ));

    CreateEmbed::new()
        .title("📋 Queue")
        .description(description)
        .color(0x5865F2)
        .footer(CreateEmbedFooter::new(format!("{} tracks", view.entries.len())))
}

pub fn error(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("⚠️ Oops")
        .description(message)
        .color(0xED4245)
}
