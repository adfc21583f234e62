// src/noyau/format.rs
//
// Affichage d’une valeur (présentation seulement).
// Ne modifie jamais l’expression ni le dernier résultat, qui gardent la précision f64.

/// Sous ce seuil, on affiche "0" (bruit flottant).
const SEUIL_ZERO: f64 = 1e-12;

/// Chiffres significatifs affichés.
const CHIFFRES_SIGNIFICATIFS: usize = 12;

/// Hors de [1e-6, 1e21[ : notation exponentielle (1e+21, 1.5e-7).
const EXPO_MIN: f64 = 1e-6;
const EXPO_MAX: f64 = 1e21;

/// Formate une valeur pour l’affichage :
/// - |v| < 1e-12 => "0"
/// - arrondi à 12 chiffres significatifs
/// - zéros finaux (et point final nu) retirés
pub fn formater(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v.abs() < SEUIL_ZERO {
        return "0".to_string();
    }

    let arrondi = arrondir_significatif(v, CHIFFRES_SIGNIFICATIFS);

    let a = arrondi.abs();
    if !(EXPO_MIN..EXPO_MAX).contains(&a) {
        return format_exposant(arrondi);
    }

    // Display f64 : plus courte écriture relisible, jamais de zéro final
    format!("{arrondi}")
}

/// Chiffres demandés pour obtenir l’écriture décimale EXACTE d’un f64
/// (767 chiffres significatifs au plus).
const CHIFFRES_EXACTS: usize = 800;

/// Arrondi à `n` chiffres significatifs, demi-écart loin de zéro
/// (1234567890125 -> 1234567890130 à 12 chiffres).
///
/// `{:.Ne}` arrondit les égalités au pair : on part donc des chiffres exacts
/// et on arrondit à la main.
fn arrondir_significatif(v: f64, n: usize) -> f64 {
    if n == 0 {
        return v;
    }

    let exact = format!("{:.*e}", CHIFFRES_EXACTS, v.abs());
    let Some((mantisse, expo)) = exact.split_once('e') else {
        return v;
    };
    let Ok(mut expo) = expo.parse::<i32>() else {
        return v;
    };

    let chiffres: Vec<u8> = mantisse
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    if chiffres.len() <= n {
        return v;
    }

    let mut garde = chiffres[..n].to_vec();
    if chiffres[n] >= 5 {
        // retenue
        let mut i = n;
        loop {
            if i == 0 {
                // 999… -> 1000… : un chiffre de plus, on décale l’exposant
                garde.insert(0, 1);
                garde.truncate(n);
                expo += 1;
                break;
            }
            i -= 1;
            if garde[i] == 9 {
                garde[i] = 0;
            } else {
                garde[i] += 1;
                break;
            }
        }
    }

    let reste: String = garde[1..].iter().map(|c| char::from(b'0' + c)).collect();
    let signe = if v.is_sign_negative() { "-" } else { "" };
    format!("{signe}{}.{reste}e{expo}", garde[0])
        .parse::<f64>()
        .unwrap_or(v)
}

/// 1e21 -> "1e+21", 1.5e-7 -> "1.5e-7".
fn format_exposant(v: f64) -> String {
    let s = format!("{v:e}");
    match s.split_once('e') {
        Some((mantisse, expo)) if !expo.starts_with('-') => format!("{mantisse}e+{expo}"),
        _ => s,
    }
}
