// src/noyau/tampon.rs
//
// Lecture structurée de l’expression en cours de saisie (notation d’affichage).
//
// Le tampon est souvent incomplet ("12×(3+", "√(5") : on ne le parse donc PAS
// comme une expression. On le découpe en morceaux avec leurs positions, puis
// ± et % travaillent sur ces morceaux au lieu de motifs sur le texte brut.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Nombre,    // suite maximale de chiffres et de points
    Moins,     // '-' ou '−' (binaire ou unaire, selon le contexte)
    Operateur, // + × * ÷ / ^
    Ouvrante,
    Fermante,
    Racine, // √
    Autre,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morceau {
    pub genre: Genre,
    pub plage: Range<usize>, // octets dans le tampon
}

fn genre_de(c: char) -> Genre {
    match c {
        '0'..='9' | '.' => Genre::Nombre,
        '-' | '−' => Genre::Moins,
        '+' | '×' | '*' | '÷' | '/' | '^' => Genre::Operateur,
        '(' => Genre::Ouvrante,
        ')' => Genre::Fermante,
        '√' => Genre::Racine,
        _ => Genre::Autre,
    }
}

/// Découpe le tampon. Seuls les nombres regroupent plusieurs caractères.
pub fn decouper(s: &str) -> Vec<Morceau> {
    let mut out: Vec<Morceau> = Vec::new();

    for (i, c) in s.char_indices() {
        let genre = genre_de(c);
        let fin = i + c.len_utf8();

        if genre == Genre::Nombre {
            if let Some(m) = out.last_mut() {
                if m.genre == Genre::Nombre && m.plage.end == i {
                    m.plage.end = fin;
                    continue;
                }
            }
        }

        out.push(Morceau {
            genre,
            plage: i..fin,
        });
    }

    out
}

/// Indice (dans `morceaux`) du dernier nombre, où qu’il soit.
fn dernier_nombre(morceaux: &[Morceau]) -> Option<usize> {
    morceaux.iter().rposition(|m| m.genre == Genre::Nombre)
}

/// Le moins juste avant `idx` est-il un signe (position unaire) ?
/// Unaire = début du tampon, après '(' ou après un opérateur.
fn signe_unaire(morceaux: &[Morceau], idx: usize) -> Option<usize> {
    let i_moins = idx.checked_sub(1)?;
    if morceaux[i_moins].genre != Genre::Moins {
        return None;
    }

    let unaire = match i_moins.checked_sub(1) {
        None => true,
        Some(avant) => matches!(
            morceaux[avant].genre,
            Genre::Ouvrante | Genre::Operateur | Genre::Moins
        ),
    };
    unaire.then_some(i_moins)
}

/// ± : bascule le signe du dernier nombre (ajoute ou retire un '-' unaire).
/// Tout ce qui précède et suit le nombre est conservé. None si aucun nombre.
pub fn basculer_signe(s: &str) -> Option<String> {
    let morceaux = decouper(s);
    let idx = dernier_nombre(&morceaux)?;

    let mut out = String::with_capacity(s.len() + 1);
    match signe_unaire(&morceaux, idx) {
        Some(i_moins) => {
            let signe = &morceaux[i_moins].plage;
            out.push_str(&s[..signe.start]);
            out.push_str(&s[signe.end..]);
        }
        None => {
            let debut = morceaux[idx].plage.start;
            out.push_str(&s[..debut]);
            out.push('-');
            out.push_str(&s[debut..]);
        }
    }
    Some(out)
}

/// Opérande final du tampon :
/// - le nombre (sans signe) qui termine le tampon
/// - ou le groupe parenthésé qui le termine (avec un √ collé devant)
pub fn operande_final(s: &str) -> Option<Range<usize>> {
    let morceaux = decouper(s);
    let dernier = morceaux.last()?;

    match dernier.genre {
        Genre::Nombre => Some(dernier.plage.clone()),
        Genre::Fermante => {
            let mut profondeur = 0usize;
            for (i, m) in morceaux.iter().enumerate().rev() {
                match m.genre {
                    Genre::Fermante => profondeur += 1,
                    Genre::Ouvrante => {
                        profondeur -= 1;
                        if profondeur == 0 {
                            let debut = match i.checked_sub(1).map(|j| &morceaux[j]) {
                                Some(r) if r.genre == Genre::Racine => r.plage.start,
                                _ => m.plage.start,
                            };
                            return Some(debut..s.len());
                        }
                    }
                    _ => {}
                }
            }
            // ')' sans '(' correspondante
            None
        }
        _ => None,
    }
}

/// % : opérande final X => (X/100). None si pas d’opérande final.
pub fn en_pourcent(s: &str) -> Option<String> {
    let plage = operande_final(s)?;
    Some(format!(
        "{}({}/100){}",
        &s[..plage.start],
        &s[plage.clone()],
        &s[plage.end..]
    ))
}

/// Nombre de '(' et de ')' dans le tampon.
pub fn compter_parentheses(s: &str) -> (usize, usize) {
    s.chars().fold((0, 0), |(o, f), c| match c {
        '(' => (o + 1, f),
        ')' => (o, f + 1),
        _ => (o, f),
    })
}

/// Le tampon se termine par un chiffre ou ')' (une valeur “fermée”).
pub fn finit_par_valeur(s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || c == ')')
}
