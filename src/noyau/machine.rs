//! Machine de saisie : l’expression en cours, le mode “juste après =” et le dernier résultat.
//!
//! Contrats :
//! - `expression` n’est jamais vide ("0" = état vide canonique).
//! - Après chaque modification, l’aperçu (`resultat`) est recalculé :
//!   valeur formatée, ou "" si l’expression est incomplète / invalide.
//! - Seul `egal()` affiche une erreur ; l’expression et le dernier résultat restent intacts.
//! - Aucun état global : une `Machine` par calculatrice, possédée par l’appelant.

use tracing::{debug, trace, warn};

use super::config::Config;
use super::erreur::ErreurEval;
use super::eval::evaluer;
use super::format::formater;
use super::tampon::{basculer_signe, compter_parentheses, en_pourcent, finit_par_valeur};

/// État vide canonique de l’expression.
pub const EXPRESSION_VIDE: &str = "0";

/// Texte affiché à la place du résultat après un `=` en échec.
pub const INDICATEUR_ERREUR: &str = "Error";

/// Actions nommées (tout ce qui n’est pas l’insertion d’un jeton).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Effacer,        // AC
    Retour,         // ⌫
    Negation,       // ±
    Pourcent,       // %
    Inverse,        // 1/x
    Carre,          // x²
    Racine,         // √
    ParentheseAuto, // ( )
    Egal,           // =
}

/// Ce que l’adaptateur affiche après chaque appel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Affichage {
    pub expression: String,
    pub resultat: String,
}

/// Rôle d’un jeton vis-à-vis du mode “juste après =”.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Classe {
    Debut,    // chiffre, '.', '(', '√' : nouveau calcul
    Binaire,  // + − × ÷ ^ : on repart du dernier résultat
    Fermante, // ')' : on garde l’expression
}

fn classe(c: char) -> Option<Classe> {
    match c {
        '0'..='9' | '.' | '(' | '√' => Some(Classe::Debut),
        '+' | '−' | '-' | '×' | '*' | '÷' | '/' | '^' => Some(Classe::Binaire),
        ')' => Some(Classe::Fermante),
        _ => None,
    }
}

/// Un '0' seul est remplacé (pas de zéro de tête) par ces jetons.
fn remplace_zero(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '('
}

#[derive(Clone, Debug)]
pub struct Machine {
    expression: String,
    juste_egal: bool,
    dernier_resultat: f64,
    resultat: String,
    config: Config,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Machine {
    pub fn new(config: Config) -> Self {
        let mut m = Self {
            expression: EXPRESSION_VIDE.to_string(),
            juste_egal: false,
            dernier_resultat: 0.0,
            resultat: String::new(),
            config,
        };
        m.apres_modification();
        m
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn juste_egal(&self) -> bool {
        self.juste_egal
    }

    pub fn dernier_resultat(&self) -> f64 {
        self.dernier_resultat
    }

    pub fn resultat(&self) -> &str {
        &self.resultat
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn affichage(&self) -> Affichage {
        Affichage {
            expression: self.expression().to_string(),
            resultat: self.resultat().to_string(),
        }
    }

    /* ------------------------ Jetons ------------------------ */

    /// Ajoute un jeton (chiffre, '.', opérateur, parenthèse, √).
    ///
    /// Juste après `=` :
    /// - chiffre / '.' / '(' / '√' : nouveau calcul
    /// - opérateur binaire : on repart du dernier résultat ("4" + "+")
    pub fn inserer(&mut self, jeton: &str) {
        let Some(premier) = jeton.chars().next() else {
            return;
        };
        let Some(role) = classe(premier) else {
            warn!(jeton, "jeton hors alphabet ignoré");
            return;
        };
        if let Some(c) = jeton.chars().find(|c| classe(*c).is_none()) {
            warn!(jeton, caractere = %c, "jeton hors alphabet ignoré");
            return;
        }
        if jeton.contains('√') && !self.config.racine_autorisee() {
            debug!(jeton, "√ indisponible en variante simple");
            return;
        }

        if self.juste_egal {
            match role {
                Classe::Debut => self.expression.clear(),
                Classe::Binaire => self.expression = self.texte_dernier_resultat(),
                Classe::Fermante => {}
            }
            self.juste_egal = false;
        }

        if self.expression == EXPRESSION_VIDE && remplace_zero(premier) {
            self.expression.clear();
        }

        self.expression.push_str(jeton);
        self.apres_modification();
    }

    /* ------------------------ Actions ------------------------ */

    /// Exécute une action nommée. Seul `Egal` peut échouer.
    pub fn appliquer(&mut self, action: Action) -> Result<(), ErreurEval> {
        match action {
            Action::Effacer => self.effacer(),
            Action::Retour => self.retour(),
            Action::Negation => self.negation(),
            Action::Pourcent => self.pourcent(),
            Action::Inverse => self.inverse(),
            Action::Carre => self.carre(),
            Action::Racine => self.racine(),
            Action::ParentheseAuto => self.parenthese_auto(),
            Action::Egal => {
                self.egal()?;
            }
        }
        Ok(())
    }

    /// AC : tout revient à l’état initial (dernier résultat compris).
    pub fn effacer(&mut self) {
        self.expression = EXPRESSION_VIDE.to_string();
        self.juste_egal = false;
        self.dernier_resultat = 0.0;
        self.apres_modification();
    }

    /// ⌫ : juste après `=`, on sort seulement du mode (l’expression reste).
    /// Sinon on retire le dernier caractère ; vide => "0".
    pub fn retour(&mut self) {
        if self.juste_egal {
            self.juste_egal = false;
        } else {
            self.expression.pop();
            if self.expression.is_empty() {
                self.expression.push_str(EXPRESSION_VIDE);
            }
        }
        self.apres_modification();
    }

    /// ± sur le dernier nombre. Sans nombre : rien.
    pub fn negation(&mut self) {
        if let Some(s) = basculer_signe(&self.expression) {
            self.expression = s;
            self.apres_modification();
        }
    }

    /// % : opérande final X => (X/100). Sans opérande final : rien.
    pub fn pourcent(&mut self) {
        if let Some(s) = en_pourcent(&self.expression) {
            self.expression = s;
            self.apres_modification();
        }
    }

    /// 1/x : sur le dernier résultat juste après `=`, sinon sur toute l’expression.
    pub fn inverse(&mut self) {
        if !self.etendue("1/x") {
            return;
        }
        let base = self.prendre_dernier_resultat().unwrap_or_else(|| self.expression.clone());
        self.expression = format!("1/({base})");
        self.apres_modification();
    }

    /// x² : "^2" collé si l’expression finit par une valeur, sinon (expr)^2.
    pub fn carre(&mut self) {
        if !self.etendue("x²") {
            return;
        }
        if let Some(ans) = self.prendre_dernier_resultat() {
            self.expression = format!("({ans})^2");
        } else if finit_par_valeur(&self.expression) {
            self.expression.push_str("^2");
        } else {
            self.expression = format!("({})^2", self.expression);
        }
        self.apres_modification();
    }

    /// √ : juste après `=`, √(résultat) ; sinon ouvre "√(" (argument à compléter).
    pub fn racine(&mut self) {
        if !self.etendue("√") {
            return;
        }
        if let Some(ans) = self.prendre_dernier_resultat() {
            self.expression = format!("√({ans})");
        } else {
            if self.expression == EXPRESSION_VIDE {
                self.expression.clear();
            }
            self.expression.push_str("√(");
        }
        self.apres_modification();
    }

    /// ( ) : ferme si une parenthèse est ouverte et qu’une valeur vient d’être saisie,
    /// ouvre sinon.
    pub fn parenthese_auto(&mut self) {
        if !self.etendue("( )") {
            return;
        }
        let (ouvrantes, fermantes) = compter_parentheses(&self.expression);
        let fin_valeur = self
            .expression
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')');

        if ouvrantes > fermantes && fin_valeur {
            self.inserer(")");
        } else {
            self.inserer("(");
        }
    }

    /// = : évalue. Succès : mémorise le résultat, passe en mode “juste après =”
    /// (l’expression reste affichée). Échec : indicateur d’erreur, rien d’autre ne change.
    pub fn egal(&mut self) -> Result<f64, ErreurEval> {
        let issue = evaluer(&self.expression, &self.config)
            .and_then(|v| v.ok_or_else(|| ErreurEval::syntaxe("expression vide")));

        match issue {
            Ok(v) => {
                self.dernier_resultat = v;
                self.juste_egal = true;
                self.resultat = formater(v);
                debug!(expression = %self.expression, valeur = v, "égal");
                Ok(v)
            }
            Err(e) => {
                self.resultat = INDICATEUR_ERREUR.to_string();
                debug!(
                    expression = %self.expression,
                    erreur = %e,
                    non_fini = e.est_non_fini(),
                    "égal en échec"
                );
                Err(e)
            }
        }
    }

    /* ------------------------ Interne ------------------------ */

    /// Écriture du dernier résultat, relisible par l’évaluateur (précision f64 complète).
    fn texte_dernier_resultat(&self) -> String {
        format!("{}", self.dernier_resultat)
    }

    /// Juste après `=` : consomme le mode et renvoie le dernier résultat en texte.
    fn prendre_dernier_resultat(&mut self) -> Option<String> {
        if !self.juste_egal {
            return None;
        }
        self.juste_egal = false;
        Some(self.texte_dernier_resultat())
    }

    fn etendue(&self, operation: &str) -> bool {
        let ok = self.config.operations_etendues();
        if !ok {
            debug!(operation, "opération indisponible en variante simple");
        }
        ok
    }

    /// Aperçu : toute erreur est avalée (saisie en cours).
    fn apres_modification(&mut self) {
        self.resultat = match evaluer(&self.expression, &self.config) {
            Ok(Some(v)) => formater(v),
            Ok(None) | Err(_) => String::new(),
        };
        trace!(expression = %self.expression, apercu = %self.resultat, "modification");
    }
}
