// src/noyau/erreur.rs
//
// Erreurs du noyau (évaluation).
// Deux familles :
// - lecture impossible : caractère interdit, syntaxe
// - valeur non finie   : division par zéro, ∞ / NaN
//
// L’entrée vide n’est PAS une erreur : evaluer() renvoie Ok(None).

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("caractère interdit: '{0}'")]
    CaractereInterdit(char),

    #[error("syntaxe: {0}")]
    Syntaxe(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    NonFini,
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    /// Expression illisible (caractère hors liste blanche ou syntaxe).
    pub fn est_syntaxe(&self) -> bool {
        matches!(self, Self::CaractereInterdit(_) | Self::Syntaxe(_))
    }

    /// Expression lisible, mais sans valeur finie.
    pub fn est_non_fini(&self) -> bool {
        matches!(self, Self::DivisionParZero | Self::NonFini)
    }
}
