pub mod library;

use rand::seq::SliceRandom;
use rand::Rng;

use library::{Responses, Trigger, TRIGGERS};

pub const NOT_UNDERSTOOD: &str = "> ⚠️ I do not understand what you are saying.";

/// What the bot does with a message that mentions it.
#[derive(Debug, PartialEq, Eq)]
pub enum KeywordReply {
    Text(&'static str),
    /// Clip path relative to the sounds directory.
    Sound(&'static str),
    NotUnderstood,
}

pub fn find_trigger(content: &str) -> Option<&'static Trigger> {
    let content = content.to_lowercase();
    TRIGGERS.iter().find(|t| content.contains(t.word))
}

pub fn reply_for<R: Rng + ?Sized>(content: &str, rng: &mut R) -> KeywordReply {
    let Some(trigger) = find_trigger(content) else {
        return KeywordReply::NotUnderstood;
    };

    match trigger.responses {
        Responses::Text(set) => set
            .choose(rng)
            .map_or(KeywordReply::NotUnderstood, |text| KeywordReply::Text(*text)),
        Responses::Sound(set) => set
            .choose(rng)
            .map_or(KeywordReply::NotUnderstood, |clip| KeywordReply::Sound(*clip)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hola_gets_greeting() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            match reply_for("<@123> HOLA amigo", &mut rng) {
                KeywordReply::Text(text) => {
                    assert!(["Wena wena", "Wena shoro", "wena qlo"].contains(&text))
                }
                other => panic!("unexpected reply: {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_trigger_in_table_order_wins() {
        // "dross" comes before "miku" in the table even though it appears later.
        let trigger = find_trigger("miku y dross").unwrap();
        assert_eq!(trigger.word, "dross");

        // "wena" is a text trigger and outranks every sound trigger.
        let trigger = find_trigger("lol wena").unwrap();
        assert_eq!(trigger.word, "wena");
    }

    #[test]
    fn test_sound_reply_comes_from_its_set() {
        let mut rng = rand::thread_rng();
        match reply_for("quiero empanadas", &mut rng) {
            KeywordReply::Sound(clip) => assert_eq!(clip, "dross/Empanadas.mp3"),
            other => panic!("unexpected reply: {other:?}"),
        }
        match reply_for("JAPON!!", &mut rng) {
            KeywordReply::Sound(clip) => assert!(clip.starts_with("japan/")),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn test_no_trigger_is_not_understood() {
        let mut rng = rand::thread_rng();
        assert_eq!(reply_for("<@123> good morning", &mut rng), KeywordReply::NotUnderstood);
        assert!(find_trigger("").is_none());
    }
}
