// src/noyau/jetons.rs
//
// Notation d’affichage -> notation de calcul -> jetons.
//
// 1) traduire : purement lexical (× ÷ − √), indépendant de l’ordre
// 2) valider  : liste blanche de caractères (rien d’autre ne passe)
// 3) tokenize : texte validé -> Vec<Tok>

use super::config::Config;
use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // √( ... ) : appel de fonction, toujours suivi de '('
    Sqrt,

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : produit par to_rpn, jamais par tokenize
    Neg,

    LPar,
    RPar,
}

/// Mot réservé pour la racine carrée après traduction.
pub const MOT_RACINE: &str = "sqrt";

/// Traduction lexicale de la notation d’affichage.
/// `×`→`*`, `÷`→`/`, `−`→`-`, `√`→`sqrt`. Le reste est recopié tel quel.
pub fn traduire(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            '√' => out.push_str(MOT_RACINE),
            _ => out.push(c),
        }
    }
    out
}

/// Liste blanche : chiffres, `.`, `+ - * /`, `^`, parenthèses, espaces.
/// En variante étendue : le mot `sqrt` (et lui seul) en plus.
pub fn valider(s: &str, config: &Config) -> Result<(), ErreurEval> {
    let mut i = 0;
    while i < s.len() {
        let reste = &s[i..];
        let Some(c) = reste.chars().next() else {
            break;
        };

        if config.racine_autorisee() && reste.starts_with(MOT_RACINE) {
            i += MOT_RACINE.len();
            continue;
        }

        let ok = c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')');
        if !ok {
            return Err(ErreurEval::CaractereInterdit(c));
        }

        i += c.len_utf8();
    }
    Ok(())
}

/// Tokenize une chaîne (déjà traduite + validée) en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .5, 5.)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - sqrt
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre : suite de chiffres et de points, un seul point permis
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            if txt.matches('.').count() > 1 {
                return Err(ErreurEval::syntaxe(format!("nombre invalide: {txt}")));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Mot : seul `sqrt` existe
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            if mot != MOT_RACINE {
                return Err(ErreurEval::CaractereInterdit(c));
            }
            out.push(Tok::Sqrt);
            continue;
        }

        return Err(ErreurEval::CaractereInterdit(c));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Sqrt => "√".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
