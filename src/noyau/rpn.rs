// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en vérifiant la syntaxe au passage
// - Puis reconstruire Expr
//
// Règles:
// - Précédences : + - (1) < * / (2) < moins unaire (3) < ^ (4, associatif à droite)
//   => -2^2 = -(2^2), 2^-1 = 2^(-1), 2*-3 = 2*(-3)
// - Moins unaire : '-' quand on n’attend PAS d’opérateur => Tok::Neg (préfixe)
// - Plus unaire : ignoré
// - Sqrt : fonction, obligatoirement suivie de '(' ; sort de la pile après la ')' fermante
// - Pas de multiplication implicite : deux valeurs collées => erreur

use super::erreur::ErreurEval;
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Sqrt, LPar, Num(2), Plus, Num(2), RPar, Star, Num(3)]
///   rpn:    [Num(2), Num(2), Plus, Sqrt, Num(3), Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().cloned().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Sqrt => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant avant √"));
                }
                if !matches!(iter.peek(), Some(Tok::LPar)) {
                    return Err(ErreurEval::syntaxe("√ doit être suivi de '('"));
                }
                ops.push(tok);
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant avant '('"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("parenthèse vide ou opérande manquant"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Sqrt)) {
                    out.extend(ops.pop());
                }
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler (un opérateur préfixe ne “ferme” rien)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("opérande manquant"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' (donc jamais au-delà d’une fonction)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Sqrt) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    out.extend(ops.pop());
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurEval::syntaxe("jeton inattendu")),
        }
    }

    if !prev_was_value {
        return Err(ErreurEval::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::Sqrt) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur maximale de l’arbre (eval, Display et Drop sont récursifs).
pub const PROFONDEUR_MAX: usize = 1000;

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de la pile porte la profondeur de son sous-arbre ;
/// au-delà de `PROFONDEUR_MAX`, la lecture s’arrête avant de construire plus haut.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let invalide = || ErreurEval::syntaxe("expression invalide");

    let borne = |profondeur: usize| {
        if profondeur > PROFONDEUR_MAX {
            Err(ErreurEval::syntaxe("expression trop profonde"))
        } else {
            Ok(profondeur)
        }
    };

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push((Expr::Nombre(v), 1)),

            Tok::Neg | Tok::Sqrt => {
                let (x, px) = st.pop().ok_or_else(invalide)?;
                let profondeur = borne(px + 1)?;
                let x = Box::new(x);
                let e = match tok {
                    Tok::Neg => Expr::Neg(x),
                    _ => Expr::Racine(x),
                };
                st.push((e, profondeur));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let profondeur = borne(pa.max(pb) + 1)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push((e, profondeur));
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurEval::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}
