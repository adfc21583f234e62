// src/app.rs
//
// Calculatrice live — module App (racine)
// ---------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier : texte tapé -> jetons, Enter = égal, Backspace = ⌫, Escape = AC

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Action;
use etat::{saisie_clavier, Saisie};

impl AppCalc {
    /// Événements clavier de la frame -> saisies, dans l’ordre reçu.
    fn saisies_clavier(ctx: &egui::Context) -> Vec<Saisie> {
        ctx.input(|i| {
            let mut out = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => out.extend(t.chars().filter_map(saisie_clavier)),
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => {
                        let a = match key {
                            egui::Key::Enter => Action::Egal,
                            egui::Key::Backspace => Action::Retour,
                            egui::Key::Escape => Action::Effacer,
                            _ => continue,
                        };
                        out.push(Saisie::Action(a));
                    }
                    _ => {}
                }
            }
            out
        })
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Un événement = une saisie complète (mutation + aperçu) avant la suivante.
        for s in Self::saisies_clavier(ctx) {
            self.saisir(s);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
