// ============================================================================
// Page d'accueil
// ============================================================================
// Formulaire : liste déroulante des cryptos + date cible.
// Le script envoie le formulaire à /predict et affiche prix et graphique.
// ============================================================================

use std::fmt::Write as _;

use crate::models::CoinEntry;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Crypto Price Predictor</title>
<style>
body { font-family: sans-serif; max-width: 960px; margin: 2em auto; }
form > * { margin-right: 0.5em; }
#error { color: #b00020; }
#graph { max-width: 100%; margin-top: 1em; }
</style>
</head>
<body>
<h1>Crypto Price Predictor</h1>
<form id="predict-form">
<label for="coin">Coin</label>
<select id="coin" name="coin">
"#;

const PAGE_TAIL: &str = r#"</select>
<label for="date">Date</label>
<input id="date" name="date" type="date" required>
<button type="submit">Predict</button>
</form>
<p id="result"></p>
<p id="error"></p>
<img id="graph" alt="" hidden>
<script>
document.getElementById("predict-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const body = new URLSearchParams(new FormData(event.target));
  const response = await fetch("/predict", { method: "POST", body });
  const data = await response.json();
  const result = document.getElementById("result");
  const error = document.getElementById("error");
  const graph = document.getElementById("graph");
  if (data.error) {
    error.textContent = data.error;
    result.textContent = "";
    graph.hidden = true;
  } else {
    error.textContent = "";
    result.textContent = "Predicted price: $" + data.predicted_price.toFixed(2);
    graph.src = "data:image/png;base64," + data.graph;
    graph.hidden = false;
  }
});
</script>
</body>
</html>
"#;

/// Échappe le texte inséré dans le HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Génère la page avec une <option> par crypto
pub fn render_index(coins: &[CoinEntry]) -> String {
    // ~60 octets par option
    let mut html = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + coins.len() * 60);
    html.push_str(PAGE_HEAD);
    for coin in coins {
        // write! sur une String ne peut pas échouer
        let _ = writeln!(
            html,
            r#"<option value="{}">{}</option>"#,
            escape_html(&coin.id),
            escape_html(&coin.name)
        );
    }
    html.push_str(PAGE_TAIL);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_index_lists_coins() {
        let html = render_index(&[
            CoinEntry::new("bitcoin", "Bitcoin"),
            CoinEntry::new("evil", "<script>alert(1)</script>"),
        ]);

        assert!(html.contains(r#"<option value="bitcoin">Bitcoin</option>"#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn test_render_index_empty_catalog() {
        let html = render_index(&[]);
        assert!(html.contains(r#"<select id="coin" name="coin">"#));
        assert!(!html.contains("<option"));
    }
}
