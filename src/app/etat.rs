//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder LA machine de saisie et traduire les événements de l’adaptateur
//! (jeton ou action nommée) en appels à la machine. Aucune logique de calcul ici.
//!
//! Contrats :
//! - Un seul propriétaire de la machine (pas d’état global).
//! - Chaque événement est traité entièrement avant le suivant (boucle egui).

use tracing::debug;

use crate::noyau::erreur::ErreurEval;
use crate::noyau::{Action, Affichage, Config, Machine};

/// Ce qu’une touche (bouton ou clavier) envoie au noyau.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Saisie {
    Jeton(&'static str),
    Action(Action),
}

/// Clavier -> saisie. Les opérateurs ASCII deviennent la notation d’affichage.
pub fn saisie_clavier(c: char) -> Option<Saisie> {
    let jeton = match c {
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        '9' => "9",
        '.' => ".",
        '+' => "+",
        '-' => "−",
        '*' => "×",
        '/' => "÷",
        '^' => "^",
        '(' => "(",
        ')' => ")",
        '%' => return Some(Saisie::Action(Action::Pourcent)),
        '=' => return Some(Saisie::Action(Action::Egal)),
        _ => return None,
    };
    Some(Saisie::Jeton(jeton))
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- noyau ---
    pub machine: Machine,

    // --- sorties ---
    // détail de la dernière erreur de `=` (l’indicateur court est dans l’affichage)
    pub erreur: String,
}

impl AppCalc {
    pub fn new(config: Config) -> Self {
        Self {
            machine: Machine::new(config),
            erreur: String::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.machine.config()
    }

    pub fn affichage(&self) -> Affichage {
        self.machine.affichage()
    }

    /// onToken / onAction : point d’entrée unique de la vue et du clavier.
    ///
    /// Le détail d’erreur suit l’indicateur : il reste tant que l’affichage ne bouge pas
    /// (ex. ± sans nombre après un `=` en échec).
    pub fn saisir(&mut self, saisie: Saisie) {
        let avant = self.affichage();

        let issue = match saisie {
            Saisie::Jeton(j) => {
                self.machine.inserer(j);
                Ok(())
            }
            Saisie::Action(a) => self.machine.appliquer(a),
        };

        match issue {
            Err(e) => self.set_erreur(&e),
            Ok(()) if self.affichage() != avant => self.erreur.clear(),
            Ok(()) => {}
        }
    }

    fn set_erreur(&mut self, e: &ErreurEval) {
        debug!(erreur = %e, "erreur affichée");
        self.erreur = if e.est_syntaxe() {
            format!("expression invalide ({e})")
        } else {
            e.to_string()
        };
    }
}
