//! Configuration : quelle variante de calculatrice ?
//!
//! - Simple  : chiffres, + − × ÷ ^, parenthèses, ±, %.
//! - Etendue : Simple + √, 1/x, x², parenthèse “intelligente”.
//!
//! Une seule machine, une seule grammaire : la variante ne fait qu’ouvrir ou fermer
//! des portes (liste blanche de l’évaluateur + opérations disponibles).

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variante {
    Simple,
    #[default]
    Etendue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub variante: Variante,
}

impl Config {
    pub fn simple() -> Self {
        Self {
            variante: Variante::Simple,
        }
    }

    pub fn etendue() -> Self {
        Self {
            variante: Variante::Etendue,
        }
    }

    /// √ (et le mot `sqrt`) passent la liste blanche.
    pub fn racine_autorisee(&self) -> bool {
        self.variante == Variante::Etendue
    }

    /// 1/x, x², √ et la parenthèse “intelligente”.
    pub fn operations_etendues(&self) -> bool {
        self.variante == Variante::Etendue
    }
}
