use crate::view::View;

pub fn render_index(view: &View, loaded: bool, has_token: bool) -> String {
    let count = view.count.as_ref().map(|el| el.text.as_str()).unwrap_or("");
    let name = view.project_name.as_ref().map(|el| el.text.as_str()).unwrap_or("");
    let (link_text, link_href) = view
        .project_link
        .as_ref()
        .map(|el| (el.text.as_str(), el.href.as_str()))
        .unwrap_or(("", "#"));
    let link_value = if link_href == "#" { "" } else { link_href };
    let history: String = view
        .history
        .iter()
        .flat_map(|list| list.entries.iter())
        .map(|entry| format!("<div class=\"history-entry\">{}</div>\n", html_escape(entry)))
        .collect();
    let status = if loaded {
        ""
    } else {
        "Impossible de charger data.json."
    };
    let token_form = if has_token { "" } else { TOKEN_FORM };

    INDEX_HTML
        .replace("{{COUNT}}", &html_escape(count))
        .replace("{{PROJECT_NAME}}", &html_escape(name))
        .replace("{{LINK_TEXT}}", &html_escape(link_text))
        .replace("{{LINK_HREF}}", &html_escape(link_href))
        .replace("{{LINK_VALUE}}", &html_escape(link_value))
        .replace("{{STATUS}}", status)
        .replace("{{TOKEN_FORM}}", token_form)
        .replace("{{HISTORY}}", &history)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const TOKEN_FORM: &str = r#"<form class="token" method="post" action="/token">
        <label for="token">Entre ton token GitHub</label>
        <input id="token" name="token" type="password" autocomplete="off" required />
        <button class="btn-ghost" type="submit">Enregistrer</button>
      </form>"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Compteur tricot</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    #count {
      font-size: 4rem;
      font-weight: 600;
      color: var(--accent-2);
      text-align: center;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      width: 100%;
    }

    .btn-add {
      background: var(--accent);
      color: white;
    }

    .btn-sub {
      background: var(--accent-2);
      color: white;
    }

    .btn-ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    form.inline {
      display: flex;
      gap: 8px;
    }

    input {
      flex: 1;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 10px 12px;
      font-size: 1rem;
    }

    .history-entry {
      padding: 6px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      color: #5f5c57;
    }

    .status {
      color: #c63b2b;
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="project-name">{{PROJECT_NAME}}</h1>
      <a id="project-link" href="{{LINK_HREF}}">{{LINK_TEXT}}</a>
    </header>

    <div class="status" id="status">{{STATUS}}</div>
    {{TOKEN_FORM}}

    <div id="count">{{COUNT}}</div>

    <section class="actions">
      <form method="post" action="/minus">
        <button class="btn-sub" id="minus" type="submit">-1</button>
      </form>
      <form method="post" action="/reset">
        <button class="btn-ghost" id="reset" type="submit">Reset</button>
      </form>
      <form method="post" action="/plus">
        <button class="btn-add" id="plus" type="submit">+1</button>
      </form>
    </section>

    <section>
      <form class="inline" id="edit-project" method="post" action="/project/name">
        <input name="value" value="{{PROJECT_NAME}}" aria-label="Nom du projet" />
        <button class="btn-ghost" type="submit">Renommer</button>
      </form>
    </section>
    <section>
      <form class="inline" id="edit-link" method="post" action="/project/link">
        <input name="value" value="{{LINK_VALUE}}" aria-label="Lien du projet" />
        <button class="btn-ghost" type="submit">Changer le lien</button>
      </form>
    </section>

    <section id="history">
{{HISTORY}}    </section>
  </main>
</body>
</html>
"##;
