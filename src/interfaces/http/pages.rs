//! Server-rendered HTML for the form flow and the QR detail page.
//!
//! The pages are assembled with `format!` over a shared shell; every
//! user-supplied value goes through `escape_html` before it lands in
//! markup.

use crate::domain::payment::{DEFAULT_PURPOSE, Payment};

/// Form field values echoed back to the user on a failed submission.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub payer_name: String,
    pub amount: String,
    pub purpose: String,
}

const STYLE: &str = r#"<style>
body { font-family: system-ui, sans-serif; background: #f5f6f8; color: #1d2330; margin: 0; }
main { max-width: 34rem; margin: 3rem auto; padding: 2rem; background: #fff; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,.07); }
h1 { font-size: 1.4rem; margin-top: 0; }
label { display: block; margin: 1rem 0 .3rem; font-weight: 600; }
input[type=text] { width: 100%; box-sizing: border-box; padding: .5rem .6rem; border: 1px solid #c8ccd6; border-radius: 6px; font-size: 1rem; }
button { margin-top: 1.2rem; padding: .55rem 1.2rem; border: 0; border-radius: 6px; background: #2554c7; color: #fff; font-size: 1rem; cursor: pointer; }
.errors { background: #fdecec; border: 1px solid #f3b8b8; border-radius: 6px; padding: .8rem 1rem 0.8rem 2rem; color: #9d2424; }
.errors li { margin: .2rem 0; }
dl { display: grid; grid-template-columns: max-content 1fr; gap: .3rem 1rem; }
dt { font-weight: 600; }
dd { margin: 0; }
.qr { text-align: center; margin: 1.5rem 0; }
.qr img { width: 260px; max-width: 100%; image-rendering: pixelated; }
.share { display: flex; gap: .5rem; align-items: center; }
.share input { flex: 1; }
.share button { margin-top: 0; white-space: nowrap; }
#copy-feedback { color: #1d7a3d; opacity: 0; transition: opacity .3s; }
a { color: #2554c7; }
</style>"#;

const QR_PAGE_SCRIPT: &str = r#"<script>
function copyLink() {
  const input = document.getElementById('share-link');
  if (!input) return;
  input.select();
  input.setSelectionRange(0, 99999);
  navigator.clipboard.writeText(input.value).then(() => {
    const badge = document.getElementById('copy-feedback');
    if (badge) {
      badge.textContent = 'Ссылка скопирована';
      badge.style.opacity = '1';
      setTimeout(() => (badge.style.opacity = '0'), 1500);
    }
  });
}

function downloadQR() {
  const img = document.getElementById('qr-image');
  if (!img) return;
  const link = document.createElement('a');
  link.href = img.src;
  link.download = 'payment-qr.png';
  link.click();
}
</script>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{STYLE}
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Renders the payment entry form, with any validation messages and the
/// submitted values echoed back.
pub fn render_form(errors: &[String], values: &FormValues) -> String {
    let error_block = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>\n", escape_html(e)))
            .collect();
        format!("<ul class=\"errors\">\n{items}</ul>\n")
    };

    let body = format!(
        r#"<h1>Платёжный QR</h1>
{error_block}<form method="post" action="/">
<label for="payer_name">ФИО плательщика</label>
<input type="text" id="payer_name" name="payer_name" value="{payer_name}">
<label for="amount">Сумма, ₽</label>
<input type="text" id="amount" name="amount" inputmode="decimal" value="{amount}">
<label for="purpose">Назначение платежа</label>
<input type="text" id="purpose" name="purpose" value="{purpose}" placeholder="{placeholder}">
<button type="submit">Создать QR</button>
</form>"#,
        error_block = error_block,
        payer_name = escape_html(&values.payer_name),
        amount = escape_html(&values.amount),
        purpose = escape_html(&values.purpose),
        placeholder = escape_html(DEFAULT_PURPOSE),
    );

    page("Платёжный QR", &body)
}

/// Renders the payment detail page with the QR image, a share link and a
/// PNG download control.
pub fn render_qr_page(payment: &Payment, share_link: &str) -> String {
    let body = format!(
        r#"<h1>Платёж готов</h1>
<dl>
<dt>Плательщик</dt><dd>{payer_name}</dd>
<dt>Сумма</dt><dd>{amount} ₽</dd>
<dt>Назначение</dt><dd>{purpose}</dd>
<dt>Создан</dt><dd>{created_at}</dd>
</dl>
<div class="qr">
<img id="qr-image" src="/qr/{id}/image" alt="Платёжный QR-код">
</div>
<div class="share">
<input id="share-link" type="text" readonly value="{share_link}">
<button type="button" onclick="copyLink()">Копировать ссылку</button>
<span id="copy-feedback"></span>
</div>
<p>
<button type="button" onclick="downloadQR()">Скачать PNG</button>
<a href="/">Создать ещё один</a>
</p>
{script}"#,
        payer_name = escape_html(&payment.payer_name),
        amount = payment.amount,
        purpose = escape_html(&payment.purpose),
        created_at = payment.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        id = escape_html(&payment.id),
        share_link = escape_html(share_link),
        script = QR_PAGE_SCRIPT,
    );

    page("Платёж готов", &body)
}
