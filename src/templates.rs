use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 32rem; margin: 4rem auto; padding: 0 1rem; }\
label { display: block; margin-bottom: .5rem; }\
input { width: 100%; padding: .5rem; margin-bottom: 1rem; }\
button { padding: .5rem 1.5rem; }\
.error { color: #b91c1c; }";

pub fn index_page() -> String {
    page(
        "Screendock",
        html! {
            h1 { "Screendock" }
            p {
                "Film delivery submission portal. The JSON API lives under "
                code { "/api" }
                "."
            }
        },
    )
}

pub fn login_page(failed: bool) -> String {
    page(
        "Sign in",
        html! {
            h1 { "Sign in" }
            @if failed {
                p class="error" { "Incorrect access code." }
            }
            form method="post" action="/login" {
                label for="code" { "Access code" }
                input type="password" name="code" id="code" autofocus required;
                button type="submit" { "Enter" }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
    .into_string()
}
