//! Noyau de la calculatrice live
//!
//! Organisation interne :
//! - config.rs  : variante (simple / étendue)
//! - erreur.rs  : ErreurEval (thiserror)
//! - jetons.rs  : traduction de notation + liste blanche + tokenisation
//! - rpn.rs     : shunting-yard + construction Expr
//! - expr.rs    : AST f64 + eval
//! - eval.rs    : pipeline complet (fonction pure)
//! - format.rs  : affichage d’une valeur (12 chiffres significatifs)
//! - tampon.rs  : lecture structurée de l’expression en cours (±, %)
//! - machine.rs : machine de saisie (expression, “juste après =”, dernier résultat)

pub mod config;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod machine;
pub mod rpn;
pub mod tampon;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::{Config, Variante};
pub use machine::{Action, Affichage, Machine};
