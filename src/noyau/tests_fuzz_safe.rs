//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler la machine et l’évaluateur sans brûler la machine hôte.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariants clés :
//!   * l’expression n’est jamais vide
//!   * l’aperçu est "" ou un nombre relisible (jamais l’indicateur d’erreur)
//!   * un `=` en échec ne touche ni au dernier résultat ni au mode
//!   * l’évaluateur ne panique jamais, ne renvoie jamais de valeur non finie

use std::time::{Duration, Instant};

use super::config::Config;
use super::eval::evaluer;
use super::machine::{Action, Machine, INDICATEUR_ERREUR};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

const JETONS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "−", "×", "÷", "^", "(", ")", "√",
];

const ACTIONS: &[Action] = &[
    Action::Effacer,
    Action::Retour,
    Action::Negation,
    Action::Pourcent,
    Action::Inverse,
    Action::Carre,
    Action::Racine,
    Action::ParentheseAuto,
    Action::Egal,
];

/// Une touche : 3 fois sur 4 un jeton, sinon une action.
fn appuyer(m: &mut Machine, rng: &mut Rng) {
    if rng.pick(4) < 3 {
        let j = JETONS[rng.pick(JETONS.len() as u32) as usize];
        m.inserer(j);
        return;
    }

    let a = ACTIONS[rng.pick(ACTIONS.len() as u32) as usize];
    let avant = (m.dernier_resultat(), m.juste_egal(), m.expression().to_string());

    match m.appliquer(a) {
        Ok(()) => {}
        Err(_) => {
            // = en échec : rien ne bouge sauf l’indicateur
            assert_eq!(a, Action::Egal);
            assert_eq!(m.dernier_resultat().to_bits(), avant.0.to_bits());
            assert_eq!(m.juste_egal(), avant.1);
            assert_eq!(m.expression(), avant.2);
            assert_eq!(m.resultat(), INDICATEUR_ERREUR);
        }
    }
}

fn check_invariants(m: &Machine) {
    assert!(!m.expression().is_empty(), "expression vide");
    assert!(m.dernier_resultat().is_finite());

    let r = m.resultat();
    if r.is_empty() || r == INDICATEUR_ERREUR {
        return;
    }
    assert!(
        r.parse::<f64>().is_ok(),
        "aperçu illisible: {r:?} (expression={:?})",
        m.expression()
    );
}

/// Texte aléatoire sur un alphabet plus large que celui de la calculatrice.
fn gen_texte(rng: &mut Rng, n: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', '+', '-', '*', '/', '^', '(', ')', ' ', '×', '÷', '−', '√', 's',
        'q', 'r', 't', '%', 'a', ';', 'e',
    ];
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_machine_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut egal_ok = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let mut m = Machine::default();
        for _ in 0..40 {
            appuyer(&mut m, &mut rng);
            check_invariants(&m);
            if m.juste_egal() {
                egal_ok += 1;
            }
        }
    }

    // Le fuzz doit aussi “voir” des égal réussis, sinon il ne balaye rien.
    assert!(egal_ok > 0, "aucun égal réussi");
}

#[test]
fn fuzz_safe_determinisme() {
    let jouer = |seed: u64| {
        let mut rng = Rng::new(seed);
        let mut m = Machine::default();
        for _ in 0..300 {
            appuyer(&mut m, &mut rng);
        }
        m.affichage()
    };

    assert_eq!(jouer(0xBADC0DE), jouer(0xBADC0DE));
}

#[test]
fn fuzz_safe_variante_simple_sans_racine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);
    let mut m = Machine::new(Config::simple());

    for _ in 0..2000 {
        budget(t0, max);
        appuyer(&mut m, &mut rng);
        check_invariants(&m);
        assert!(!m.expression().contains('√'), "√ en variante simple");
    }
}

#[test]
fn fuzz_safe_evaluateur_texte_libre() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFEED_u64);
    let config = Config::default();

    for _ in 0..2000 {
        budget(t0, max);

        let n = rng.pick(16) as usize;
        let s = gen_texte(&mut rng, n);

        match evaluer(&s, &config) {
            Ok(Some(v)) => assert!(v.is_finite(), "s={s:?} v={v}"),
            Ok(None) => assert!(s.trim().is_empty(), "s={s:?}"),
            Err(_) => {}
        }
    }
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    // 200 niveaux : la lecture doit rester correcte (pile bornée)
    let n = 200;
    let s = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    let v = evaluer(&s, &Config::default()).unwrap().unwrap();
    assert_eq!(v, 201.0);
}

#[test]
fn fuzz_safe_imbrication_extreme_refusee() {
    // 100 000 niveaux : refus propre, sans débordement de pile
    let n = 100_000;
    let config = Config::default();

    for s in [
        format!("{}1", "-".repeat(n)),
        format!("{}4{}", "√(".repeat(n), ")".repeat(n)),
        format!("1{}", "+1".repeat(n)),
    ] {
        let e = evaluer(&s, &config).unwrap_err();
        assert!(e.est_syntaxe(), "e={e}");
    }
}

#[test]
fn fuzz_safe_touche_moins_maintenue() {
    // l’aperçu en direct relit l’expression à chaque appui
    let mut m = Machine::default();
    m.inserer("1");
    for _ in 0..3_000 {
        m.inserer("−");
    }
    m.inserer("1");
    check_invariants(&m);
    assert_eq!(m.resultat(), "");

    assert!(m.egal().is_err());
    assert_eq!(m.resultat(), INDICATEUR_ERREUR);
}
