use crate::core::display::RankResult;
use crate::error::WatchResult;
use minijinja::{context, Environment, Template};
use once_cell::sync::Lazy;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{error, info};

// Browsers poll the API at this pace.
pub const PAGE_REFRESH_MS: u64 = 30_000;

static TEMPLATES_ENVIRONMENT: Lazy<Environment> = Lazy::new(|| {
    info!("Initializing templating engine environment.");
    let mut env = Environment::new();

    // Use strum to iterate over the variants of the enum.
    for template in PageTemplate::iter() {
        // Sources are static literals, checked by the tests below.
        if let Err(e) = env.add_template(template.name(), template.template()) {
            error!("Could not load template {}. {e}", template.name());
        }
    }

    info!("Templates loaded in templating engine environment.");

    env
});

#[derive(EnumIter)]
pub enum PageTemplate {
    Index,
    Summary,
}

impl PageTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            // The .html extension turns on auto-escaping.
            PageTemplate::Index => "index.html",
            PageTemplate::Summary => "summary.txt",
        }
    }

    pub fn get(&self) -> WatchResult<Template<'_, '_>> {
        Ok(TEMPLATES_ENVIRONMENT.get_template(self.name())?)
    }

    pub fn template(&self) -> &'static str {
        match self {
            PageTemplate::Index => {
                r#"<!doctype html>
<html lang="ru">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width,initial-scale=1" />
    <title>Место · {{ name }}</title>
    <style>
      :root { color-scheme: dark; }
      body {
        margin: 0;
        min-height: 100vh;
        display: grid;
        place-items: center;
        background: #0b0f19;
        color: #e8eefc;
        font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif;
      }
      #place {
        font-size: clamp(96px, 20vw, 260px);
        font-weight: 800;
        letter-spacing: -0.04em;
        line-height: 1;
      }
      #status { margin-top: 14px; font-size: 14px; opacity: 0.75; }
    </style>
  </head>
  <body>
    <div>
      <div id="place">—</div>
      <div id="status"></div>
    </div>
    <script>
      const placeEl = document.getElementById("place");
      const statusEl = document.getElementById("status");
      async function refresh() {
        try {
          statusEl.textContent = "обновление…";
          const r = await fetch("{{ endpoint|safe }}", { cache: "no-store" });
          const j = await r.json();
          placeEl.textContent = j.place ?? "не найден";
          statusEl.textContent = new Date().toLocaleTimeString("ru-RU");
        } catch (e) {
          placeEl.textContent = "ошибка";
          statusEl.textContent = "";
        }
      }
      refresh();
      setInterval(refresh, {{ refresh_ms }});
    </script>
  </body>
</html>
"#
            }
            PageTemplate::Summary => {
                "{{ name }} (form {{ form }}): \
                {%- if place is none %} not found{% else %} place {{ place }}{% endif %} \
                [{{ source }}]"
            }
        }
    }
}

/// Static page served at the root, showing the place polled from `endpoint`.
pub fn index_page(name: &str, endpoint: &str) -> WatchResult<String> {
    let page = PageTemplate::Index.get()?.render(context! {
        name => name,
        endpoint => endpoint,
        refresh_ms => PAGE_REFRESH_MS,
    })?;
    Ok(page)
}

/// One line description of a result, for logs.
pub fn summary(result: &RankResult) -> WatchResult<String> {
    Ok(PageTemplate::Summary.get()?.render(context! {
        name => result.name,
        form => result.form,
        place => result.place,
        source => result.source,
    })?)
}
