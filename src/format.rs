// Result formatter: renders a classification result into a bordered text
// block for terminal display. Kept free of I/O so it is trivial to test.

use crate::client::ClassificationResult;

const SEPARATOR_WIDTH: usize = 60;

/// At most this many alternative candidates are shown, in service order.
const MAX_ALTERNATIVES: usize = 5;

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Render a classification result as a multi-line bordered block. Never
/// fails: absent optional fields already carry their defaults from decoding.
pub fn format_result(result: &ClassificationResult) -> String {
    let mut out = Vec::new();

    out.push(separator());
    out.push("📋 РЕЗУЛЬТАТ КЛАСИФІКАЦІЇ".to_string());
    out.push(separator());
    out.push(format!("🎯 Служба: {}", result.service));
    out.push(format!("📊 Впевненість: {}", percent(result.confidence)));

    if result.needs_moderation {
        out.push("⚠️  Потребує модерації: Так".to_string());
    } else {
        out.push("✅ Потребує модерації: Ні".to_string());
    }

    if !result.top_alternatives.is_empty() {
        out.push(String::new());
        out.push("🔍 Альтернативні варіанти:".to_string());
        for (i, alt) in result
            .top_alternatives
            .iter()
            .take(MAX_ALTERNATIVES)
            .enumerate()
        {
            out.push(format!(
                "   {}. {} ({})",
                i + 1,
                alt.service,
                percent(alt.confidence)
            ));
        }
    }

    out.push(separator());
    out.join("\n")
}

/// Startup header: title, the service URL in use, and the sentinel commands.
pub fn banner(service_url: &str) -> String {
    let mut out = Vec::new();

    out.push(separator());
    out.push("🤖 ТЕСТУВАННЯ КЛАСИФІКАЦІЇ ЗВЕРНЕНЬ".to_string());
    out.push(separator());
    out.push(format!("🌐 Сервіс: {}", service_url));
    out.push(String::new());
    out.push("Введіть текст звернення для класифікації.".to_string());
    out.push("Для виходу введіть 'exit', 'quit' або 'q'".to_string());
    out.push("Для очищення екрану введіть 'clear' або 'cls'".to_string());
    out.push(separator());
    out.join("\n")
}

/// A confidence in [0,1] as a percentage with two decimals: 0.87 → "87.00%".
fn percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
