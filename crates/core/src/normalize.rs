//! Linguistic normalization for Portuguese text.
//!
//! The full treatment is: lowercase, strip every character that is not a
//! basic Latin letter, an acute-accented vowel, or whitespace, drop
//! stopwords, and reduce each surviving token to its Snowball stem.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Portuguese stopword list (the NLTK set). Accented entries whose
/// accents fall outside the kept `áéíóú` range never match a stripped
/// token; they are retained so the list stays recognizable as-is.
const STOPWORDS: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às", "até",
    "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do", "dos", "e",
    "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "éramos", "essa", "essas",
    "esse", "esses", "esta", "está", "estamos", "estão", "estar", "estas", "estava", "estavam",
    "estávamos", "este", "esteja", "estejam", "estejamos", "estes", "esteve", "estive", "estivemos",
    "estiver", "estivera", "estiveram", "estivéramos", "estiverem", "estivermos", "estivesse",
    "estivessem", "estivéssemos", "estou", "eu", "foi", "fomos", "for", "fora", "foram", "fôramos",
    "forem", "formos", "fosse", "fossem", "fôssemos", "fui", "há", "haja", "hajam", "hajamos",
    "hão", "havemos", "haver", "hei", "houve", "houvemos", "houver", "houvera", "houverá",
    "houveram", "houvéramos", "houverão", "houverei", "houverem", "houveremos", "houveria",
    "houveriam", "houveríamos", "houvermos", "houvesse", "houvessem", "houvéssemos", "isso",
    "isto", "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha", "minhas",
    "muito", "na", "não", "nas", "nem", "no", "nos", "nós", "nossa", "nossas", "nosso", "nossos",
    "num", "numa", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos", "por", "qual",
    "quando", "que", "quem", "são", "se", "seja", "sejam", "sejamos", "sem", "ser", "será",
    "serão", "serei", "seremos", "seria", "seriam", "seríamos", "seu", "seus", "só", "somos",
    "sou", "sua", "suas", "também", "te", "tem", "tém", "temos", "tenha", "tenham", "tenhamos",
    "tenho", "terá", "terão", "terei", "teremos", "teria", "teriam", "teríamos", "teu", "teus",
    "teve", "tinha", "tinham", "tínhamos", "tive", "tivemos", "tiver", "tivera", "tiveram",
    "tivéramos", "tiverem", "tivermos", "tivesse", "tivessem", "tivéssemos", "tu", "tua", "tuas",
    "um", "uma", "você", "vocês", "vos",
];

fn stopword_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

fn keep_letters_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Hard-coded pattern, valid by construction.
    RE.get_or_init(|| Regex::new(r"[^a-záéíóú\s]").expect("letter-filter pattern"))
}

fn stemmer() -> &'static Stemmer {
    static STEMMER: OnceLock<Stemmer> = OnceLock::new();
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::Portuguese))
}

/// Lowercase `text` and remove every character outside basic Latin
/// letters, the acute-accented vowels, and whitespace.
pub(crate) fn keep_letters(text: &str) -> String {
    let lowered = text.to_lowercase();
    keep_letters_pattern().replace_all(&lowered, "").into_owned()
}

/// Normalize raw text into a single string of space-joined,
/// stopword-free, stemmed Portuguese tokens.
///
/// Deterministic: the stopword set and stemmer are fixed and loaded once
/// per process.
pub fn normalize(text: &str) -> String {
    let stripped = keep_letters(text);
    let stopwords = stopword_set();
    let stemmer = stemmer();

    stripped
        .split_whitespace()
        .filter(|token| !stopwords.contains(token))
        .map(|token| stemmer.stem(token).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
