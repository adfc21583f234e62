//! Scénarios de bout en bout : ce que voit l’utilisateur, touche après touche.
//!
//! Chaque test part d’une machine neuve et ne regarde que l’Affichage
//! (+ le dernier résultat / le mode quand c’est le sujet du test).

use super::config::Config;
use super::erreur::ErreurEval;
use super::eval::evaluer;
use super::format::formater;
use super::machine::{Action, Machine, INDICATEUR_ERREUR};

/// Tape une suite de jetons (un caractère = un jeton).
fn taper(m: &mut Machine, touches: &str) {
    for c in touches.chars() {
        m.inserer(&c.to_string());
    }
}

fn machine(touches: &str) -> Machine {
    let mut m = Machine::default();
    taper(&mut m, touches);
    m
}

fn assert_affiche(m: &Machine, expression: &str, resultat: &str) {
    let a = m.affichage();
    assert_eq!(a.expression, expression, "expression");
    assert_eq!(a.resultat, resultat, "resultat (expression={expression:?})");
}

/* ------------------------ Évaluation + format ------------------------ */

#[test]
fn seuil_zero_apres_evaluation() {
    let v = evaluer("0.0000000000001", &Config::default())
        .unwrap()
        .unwrap();
    assert_eq!(formater(v), "0");
}

#[test]
fn un_tiers_douze_chiffres() {
    let v = evaluer("1÷3", &Config::default()).unwrap().unwrap();
    let s = formater(v);
    assert_eq!(s, "0.333333333333");
    assert!(!s.ends_with('0'));
}

#[test]
fn injection_refusee() {
    for s in ["alert(1)", "1;alert(1)", "process.exit()", "2+2//", "`2`"] {
        let e = evaluer(s, &Config::default()).unwrap_err();
        assert!(e.est_syntaxe(), "s={s:?} e={e}");
    }
}

/* ------------------------ Égal ------------------------ */

#[test]
fn egal_succes() {
    let mut m = machine("2+2");
    assert_eq!(m.egal(), Ok(4.0));
    assert_eq!(m.dernier_resultat(), 4.0);
    assert!(m.juste_egal());
    assert_affiche(&m, "2+2", "4");
}

#[test]
fn apres_egal_chiffre_nouveau_calcul() {
    let mut m = machine("2+2");
    m.egal().unwrap();
    m.inserer("3");
    assert!(!m.juste_egal());
    assert_affiche(&m, "3", "3");
}

#[test]
fn apres_egal_operateur_continue() {
    let mut m = machine("2+2");
    m.egal().unwrap();
    m.inserer("+");
    assert_affiche(&m, "4+", "");
    taper(&mut m, "1");
    assert_affiche(&m, "4+1", "5");
}

#[test]
fn apres_egal_parenthese_et_racine_nouveau_calcul() {
    let mut m = machine("2+2");
    m.egal().unwrap();
    m.inserer("(");
    assert_eq!(m.expression(), "(");

    let mut m = machine("2+2");
    m.egal().unwrap();
    m.inserer("√");
    assert_eq!(m.expression(), "√");
}

#[test]
fn apres_egal_fermante_garde_expression() {
    let mut m = machine("(2+2");
    m.inserer(")");
    m.egal().unwrap();
    m.inserer(")");
    assert!(!m.juste_egal());
    assert_eq!(m.expression(), "(2+2))");
}

#[test]
fn apres_egal_resultat_negatif_puis_operateur() {
    let mut m = machine("2−5");
    m.egal().unwrap();
    taper(&mut m, "×2");
    assert_affiche(&m, "-3×2", "-6");
}

#[test]
fn apres_egal_precision_complete_conservee() {
    let mut m = machine("1÷3");
    m.egal().unwrap();
    assert_eq!(m.resultat(), "0.333333333333");
    taper(&mut m, "×3");
    // le dernier résultat garde la précision f64, pas l’affichage arrondi
    assert_eq!(m.expression(), format!("{}×3", 1.0 / 3.0));
    assert_eq!(m.resultat(), "1");
}

#[test]
fn division_par_zero_au_commit() {
    let mut m = machine("7");
    m.egal().unwrap();
    m.effacer();
    taper(&mut m, "9");
    m.egal().unwrap();
    taper(&mut m, "5÷0");

    assert_eq!(m.egal(), Err(ErreurEval::DivisionParZero));
    assert_affiche(&m, "5÷0", INDICATEUR_ERREUR);
    assert_eq!(m.dernier_resultat(), 9.0);
    assert!(!m.juste_egal());

    // l’expression reste éditable
    m.retour();
    taper(&mut m, "2");
    assert_affiche(&m, "5÷2", "2.5");
}

#[test]
fn expression_incomplete_au_commit() {
    let mut m = machine("3×(2+");
    assert_eq!(m.resultat(), "");
    let e = m.egal().unwrap_err();
    assert!(e.est_syntaxe());
    assert_affiche(&m, "3×(2+", INDICATEUR_ERREUR);

    // une nouvelle touche efface l’indicateur (aperçu recalculé)
    taper(&mut m, "1)");
    assert_affiche(&m, "3×(2+1)", "9");
}

/* ------------------------ ± et % ------------------------ */

#[test]
fn negation_aller_retour() {
    let mut m = machine("12+34");
    m.appliquer(Action::Negation).unwrap();
    assert_affiche(&m, "12+-34", "-22");
    m.appliquer(Action::Negation).unwrap();
    assert_affiche(&m, "12+34", "46");
}

#[test]
fn pourcent_deux_fois() {
    let mut m = machine("50");
    m.appliquer(Action::Pourcent).unwrap();
    assert_affiche(&m, "(50/100)", "0.5");
    m.appliquer(Action::Pourcent).unwrap();
    assert_affiche(&m, "((50/100)/100)", "0.005");
}

#[test]
fn pourcent_dans_une_somme() {
    let mut m = machine("200+10");
    m.pourcent();
    assert_affiche(&m, "200+(10/100)", "200.1");
}

#[test]
fn negation_dans_un_argument_de_racine() {
    let mut m = Machine::default();
    m.racine();
    taper(&mut m, "5");
    m.negation();
    assert_affiche(&m, "√(-5", "");
    m.inserer(")");
    assert_eq!(m.egal(), Err(ErreurEval::NonFini));
}

/* ------------------------ Variante étendue ------------------------ */

#[test]
fn parenthese_auto_sequence() {
    let mut m = machine("2×");
    m.appliquer(Action::ParentheseAuto).unwrap();
    taper(&mut m, "3+4");
    m.appliquer(Action::ParentheseAuto).unwrap();
    assert_affiche(&m, "2×(3+4)", "14");
}

#[test]
fn carre_puis_racine_apres_egal() {
    let mut m = machine("3");
    m.appliquer(Action::Carre).unwrap();
    assert_affiche(&m, "3^2", "9");
    m.appliquer(Action::Egal).unwrap();
    m.appliquer(Action::Racine).unwrap();
    assert_affiche(&m, "√(9)", "3");
    assert!(!m.juste_egal());
}

#[test]
fn inverse_de_zero_en_erreur() {
    let mut m = Machine::default();
    m.inverse();
    assert_affiche(&m, "1/(0)", "");
    assert_eq!(m.egal(), Err(ErreurEval::DivisionParZero));
}

#[test]
fn variante_simple_ignore_operations_etendues() {
    let mut m = Machine::new(Config::simple());
    taper(&mut m, "4");
    for a in [
        Action::Inverse,
        Action::Carre,
        Action::Racine,
        Action::ParentheseAuto,
    ] {
        m.appliquer(a).unwrap();
    }
    assert_affiche(&m, "4", "4");
    taper(&mut m, "^2");
    assert_affiche(&m, "4^2", "16");
}
