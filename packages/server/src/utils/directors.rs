//! Static lookup tables for the derived directors endpoint.
//!
//! These are plain constant mappings, re-read on every request; there is no
//! cache to invalidate when the film table changes.

/// Japanese display names for known Studio Ghibli directors.
pub const JAPANESE_NAMES: &[(&str, &str)] = &[
    ("Hayao Miyazaki", "宮崎駿"),
    ("Isao Takahata", "高畑勲"),
    ("Gorō Miyazaki", "宮崎吾朗"),
    ("Hiromasa Yonebayashi", "米林宏昌"),
    ("Hiroyuki Morita", "森田宏幸"),
    ("Yoshifumi Kondō", "近藤喜文"),
    ("Michael Dudok de Wit", "マイケル・ドゥドック・デ・ウィット"),
];

/// French biographies for known directors.
pub const BIOS: &[(&str, &str)] = &[
    (
        "Hayao Miyazaki",
        "Le maître incontesté de l'animation japonaise. Cofondateur du Studio Ghibli en 1985, \
         il a révolutionné l'animation avec des chefs-d'œuvre comme Le Voyage de Chihiro, \
         Mon voisin Totoro et Princesse Mononoké.",
    ),
    (
        "Isao Takahata",
        "Cofondateur du Studio Ghibli et pionnier du réalisme dans l'animation. Ses récits \
         poignants comme Le Tombeau des lucioles explorent la mémoire, la guerre et la \
         condition humaine.",
    ),
    (
        "Gorō Miyazaki",
        "Fils de Hayao Miyazaki, architecte de formation, il apporte une vision unique aux \
         Contes de Terremer et La Colline aux coquelicots.",
    ),
    (
        "Hiromasa Yonebayashi",
        "Le plus jeune réalisateur de l'histoire du studio. Il signe Arrietty et Souvenirs \
         de Marnie, des miniatures poétiques sur l'indépendance et les liens invisibles.",
    ),
    (
        "Hiroyuki Morita",
        "Réalisateur du Royaume des chats, il apporte une touche de légèreté et d'humour \
         félin à l'univers Ghibli.",
    ),
    (
        "Yoshifumi Kondō",
        "L'héritier tragique de Miyazaki, disparu trop tôt. Son unique film Si tu tends \
         l'oreille reste un joyau d'émotion.",
    ),
    (
        "Michael Dudok de Wit",
        "Réalisateur néerlandais de La Tortue rouge, il apporte une sensibilité européenne \
         unique dans l'univers Ghibli.",
    ),
];

/// Fallback biography for directors absent from [`BIOS`].
pub const DEFAULT_BIO: &str = "Réalisateur talentueux du Studio Ghibli.";

pub fn japanese_name(director: &str) -> &'static str {
    JAPANESE_NAMES
        .iter()
        .find(|(name, _)| *name == director)
        .map(|(_, jp)| *jp)
        .unwrap_or("")
}

pub fn biography(director: &str) -> &'static str {
    BIOS.iter()
        .find(|(name, _)| *name == director)
        .map(|(_, bio)| *bio)
        .unwrap_or(DEFAULT_BIO)
}

/// Portrait path under `/images/directors/`, derived from the name:
/// diacritics folded to ASCII, lowercased, spaces hyphenated, anything
/// else dropped.
pub fn portrait_path(director: &str) -> String {
    let mut slug = String::with_capacity(director.len());
    for c in director.chars() {
        match fold_diacritic(c) {
            Some(' ') => slug.push('-'),
            Some(f) if f.is_ascii_alphanumeric() || f == '-' => slug.push(f.to_ascii_lowercase()),
            _ => {}
        }
    }
    format!("/images/directors/{slug}.jpg")
}

/// ASCII folding for the accented characters that occur in director names.
/// Non-ASCII characters without a fold rule are dropped from the slug.
fn fold_diacritic(c: char) -> Option<char> {
    Some(match c {
        'ā' | 'à' | 'á' | 'â' | 'ä' | 'Ā' | 'À' | 'Á' | 'Â' | 'Ä' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ī' | 'ì' | 'í' | 'î' | 'ï' | 'Ī' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ō' | 'ò' | 'ó' | 'ô' | 'ö' | 'Ō' | 'Ò' | 'Ó' | 'Ô' | 'Ö' => 'o',
        'ū' | 'ù' | 'ú' | 'û' | 'ü' | 'Ū' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        _ if c.is_ascii() => c,
        _ => return None,
    })
}
