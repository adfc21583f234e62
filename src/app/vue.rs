// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : expression (haut) + aperçu / résultat (bas)
// - Tactile : gros boutons, grille 4 colonnes
// - Rangée de fonctions selon la variante (étendue : ( ) 1/x x² √)
//
// La vue ne calcule rien : chaque clic devient une Saisie, passée à AppCalc::saisir.

use eframe::egui;

use super::etat::{AppCalc, Saisie};
use crate::noyau::{Action, Variante};

/// Une touche du pavé.
struct Touche {
    label: &'static str,
    saisie: Saisie,
}

const fn jeton(label: &'static str) -> Touche {
    Touche {
        label,
        saisie: Saisie::Jeton(label),
    }
}

const fn action(label: &'static str, a: Action) -> Touche {
    Touche {
        label,
        saisie: Saisie::Action(a),
    }
}

const RANGEE_ETENDUE: &[Touche] = &[
    action("( )", Action::ParentheseAuto),
    action("1/x", Action::Inverse),
    action("x²", Action::Carre),
    action("√", Action::Racine),
];

const RANGEE_SIMPLE: &[Touche] = &[jeton("("), jeton(")"), jeton("^")];

const PAVE: [[Touche; 4]; 5] = [
    [
        action("AC", Action::Effacer),
        action("⌫", Action::Retour),
        action("%", Action::Pourcent),
        jeton("÷"),
    ],
    [jeton("7"), jeton("8"), jeton("9"), jeton("×")],
    [jeton("4"), jeton("5"), jeton("6"), jeton("−")],
    [jeton("1"), jeton("2"), jeton("3"), jeton("+")],
    [
        action("±", Action::Negation),
        jeton("0"),
        jeton("."),
        action("=", Action::Egal),
    ],
];

const TAILLE_BOUTON: [f32; 2] = [72.0, 48.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_ecran(ui);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.ui_pave(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let a = self.affichage();
        let juste_egal = self.machine.juste_egal();
        let dernier = self.machine.dernier_resultat();

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(egui::RichText::new(&a.expression).monospace().size(26.0));

                    // hauteur stable même sans aperçu ; "= 4" juste après égal
                    let resultat = match (a.resultat.is_empty(), juste_egal) {
                        (true, _) => " ".to_string(),
                        (false, true) => format!("= {}", a.resultat),
                        (false, false) => a.resultat.clone(),
                    };
                    let texte = egui::RichText::new(resultat).monospace().size(18.0);
                    let texte = if juste_egal { texte.strong() } else { texte.weak() };
                    ui.label(texte)
                        .on_hover_text(format!("Dernier résultat : {dernier}"));
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let rangee = match self.config().variante {
            Variante::Etendue => RANGEE_ETENDUE,
            Variante::Simple => RANGEE_SIMPLE,
        };

        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for t in rangee {
                    self.bouton(ui, t);
                }
                ui.end_row();

                for ligne in &PAVE {
                    for t in ligne {
                        self.bouton(ui, t);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, t: &Touche) {
        let texte = egui::RichText::new(t.label).size(20.0);
        if ui
            .add_sized(TAILLE_BOUTON, egui::Button::new(texte))
            .clicked()
        {
            self.saisir(t.saisie);
        }
    }
}
