//! Noyau — évaluation (pipeline réel)
//!
//! traduire -> valider (liste blanche) -> jetons -> RPN -> Expr -> eval
//!
//! Fonction pure : aucun état retenu entre deux appels, aucun effet de bord
//! (hors journal `trace`).

use tracing::trace;

use super::config::Config;
use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize, traduire, valider};
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue une expression en notation d’affichage.
///
/// - `Ok(None)`    : entrée vide, rien à afficher (pas une erreur)
/// - `Ok(Some(v))` : valeur finie
/// - `Err(_)`      : caractère interdit, syntaxe, division par zéro, non fini
pub fn evaluer(texte: &str, config: &Config) -> Result<Option<f64>, ErreurEval> {
    let s = texte.trim();
    if s.is_empty() {
        return Ok(None);
    }

    // 1) Notation de calcul
    let traduit = traduire(s);

    // 2) Liste blanche (avant toute lecture)
    valider(&traduit, config)?;

    // 3) Jetons
    let jetons = tokenize(&traduit)?;

    // 4) RPN
    let rpn = to_rpn(&jetons)?;

    // 5) AST
    let expr = from_rpn(&rpn)?;
    trace!(rpn = %format_tokens(&rpn), arbre = %expr, "expression lue");

    // 6) Valeur
    expr.eval().map(Some)
}
