// src/noyau/expr.rs
//
// AST flottant (f64).
// - Nombre : littéral
// - Neg    : moins unaire
// - Racine : √(x)
// - Add/Sub/Mul/Div/Pow : binaires
//
// IMPORTANT :
// - eval() ne renvoie jamais ∞ ni NaN : division par zéro et valeurs non finies => Err.
// - Pas d’état, pas d’effet de bord.

use std::fmt;

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),
    Racine(Box<Expr>), // √(x)

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>), // x^y
}

impl Expr {
    /// Évalue l’arbre. Toute valeur intermédiaire non finie arrête le calcul.
    pub fn eval(&self) -> Result<f64, ErreurEval> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,

            Neg(x) => -x.eval()?,
            Racine(x) => x.eval()?.sqrt(),

            Add(a, b) => a.eval()? + b.eval()?,
            Sub(a, b) => a.eval()? - b.eval()?,
            Mul(a, b) => a.eval()? * b.eval()?,
            Div(a, b) => {
                let num = a.eval()?;
                let den = b.eval()?;
                if den == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                num / den
            }
            Pow(a, b) => a.eval()?.powf(b.eval()?),
        };

        if v.is_finite() {
            Ok(v)
        } else {
            Err(ErreurEval::NonFini)
        }
    }
}

/// Affichage entièrement parenthésé (journal / tests de précédence).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "(-{x})"),
            Racine(x) => write!(f, "√({x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
        }
    }
}
