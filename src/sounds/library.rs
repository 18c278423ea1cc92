//! Trigger words and what the bot answers with. Clip paths are relative to
//! the configured sounds directory.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responses {
    Text(&'static [&'static str]),
    Sound(&'static [&'static str]),
}

#[derive(Debug)]
pub struct Trigger {
    pub word: &'static str,
    pub responses: Responses,
}

const GREETINGS: &[&str] = &["Wena wena", "Wena shoro", "wena qlo"];

const DROSS: &[&str] = &[
    "dross/Empanadas.mp3",
    "dross/Te Ha Hablado Dross.mp3",
    "dross/Piano.mp3",
    "dross/Coño.mp3",
    "dross/Verga.mp3",
    "dross/Ustedes Son Imbeciles.mp3",
];

const NONI: &[&str] = &[
    "noni/Ahh.mp3",
    "noni/Oh Que Guapo.mp3",
    "noni/Uh La La.mp3",
    "noni/Hemos Abierto El Negocio.mp3",
    "noni/Le Puedo Pagar.mp3",
];

const MIKU: &[&str] = &["miku/Levan Polka.mp3", "miku/Miku Miku Miku.mp3"];

const EMPANADAS: &[&str] = &["dross/Empanadas.mp3"];

const CHILE: &[&str] = &[
    "chile/Callate Vo Vieja Culia.mp3",
    "chile/Oye Aweonao.mp3",
    "chile/Se Escucha Alla Atras.mp3",
    "chile/Y Me Le Ocurrio Otra Idea.mp3",
];

const JAPAN: &[&str] = &["japan/HA HOI AAEAHHHH.mp3", "japan/Omae Wa Mou Shindeiru.mp3"];

const SQUID: &[&str] = &["squid/Yo Ya Estuve En Estos Juegos.mp3", "squid/Alto.mp3"];

const LOL: &[&str] = &[
    "lol/Ahora Me Ves Ahora No Me Ves.mp3",
    "lol/El Tamaño No Lo Es Todo.mp3",
];

const RANDOM: &[&str] = &[
    "random/Ay Dios Mio.mp3",
    "random/El Lado Misterioso De La Isla.mp3",
    "random/Guatona Con Moño.mp3",
    "random/Maraca Maraca.mp3",
    "random/Me Electrocutaste Pedrito.mp3",
];

/// Scanned in order; the first word found in a message wins.
pub const TRIGGERS: &[Trigger] = &[
    Trigger {
        word: "wena",
        responses: Responses::Text(GREETINGS),
    },
    Trigger {
        word: "hola",
        responses: Responses::Text(GREETINGS),
    },
    Trigger {
        word: "dross",
        responses: Responses::Sound(DROSS),
    },
    Trigger {
        word: "noni",
        responses: Responses::Sound(NONI),
    },
    Trigger {
        word: "miku",
        responses: Responses::Sound(MIKU),
    },
    Trigger {
        word: "empanada",
        responses: Responses::Sound(EMPANADAS),
    },
    Trigger {
        word: "empanadas",
        responses: Responses::Sound(EMPANADAS),
    },
    Trigger {
        word: "chile",
        responses: Responses::Sound(CHILE),
    },
    Trigger {
        word: "japon",
        responses: Responses::Sound(JAPAN),
    },
    Trigger {
        word: "calamar",
        responses: Responses::Sound(SQUID),
    },
    Trigger {
        word: "lol",
        responses: Responses::Sound(LOL),
    },
    Trigger {
        word: "random",
        responses: Responses::Sound(RANDOM),
    },
];
