use yew::prelude::*;

use crate::components::contact_form::ContactWidget;
use crate::components::typed_word::TypedWord;
use crate::scroll;

const SERVICES: [(&str, &str); 3] = [
    ("Landing pages", "Páginas rápidas e objetivas, pensadas para transformar visitas em contatos."),
    ("Sites institucionais", "Presença profissional para apresentar sua marca com clareza."),
    ("Otimização", "Ajustes de desempenho, SEO e acessibilidade em sites existentes."),
];

const STEPS: [(&str, &str); 3] = [
    ("Conversa", "Entendemos o seu negócio, o público e o objetivo da página."),
    ("Criação", "Layout, texto e código desenvolvidos sob medida."),
    ("Entrega", "Publicação, testes e acompanhamento dos primeiros resultados."),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // Reveal/anchor glue needs the rendered markup, so it is installed after mount.
    use_effect_with_deps(
        move |_| {
            let effects = web_sys::window()
                .and_then(|w| w.document())
                .map(|document| scroll::install(&document));
            move || drop(effects)
        },
        (),
    );

    html! {
        <>
            <header class="site-header">
                <nav class="nav-content">
                    <a href="#inicio" class="nav-logo">{"estúdio"}</a>
                    <div class="nav-right">
                        <a href="#servicos" class="nav-link">{"Serviços"}</a>
                        <a href="#processo" class="nav-link">{"Processo"}</a>
                        <a href="#contato" class="nav-link nav-cta">{"Contato"}</a>
                    </div>
                </nav>
            </header>

            <main>
                <section id="inicio" class="hero">
                    <h1 class="hero-title reveal">
                        {"Sites que "}
                        <TypedWord />
                    </h1>
                    <p class="hero-subtitle reveal">
                        {"Design e desenvolvimento web para pequenas empresas e profissionais."}
                    </p>
                    <a href="#contato" class="btn btn-primary reveal">{"Quero um orçamento"}</a>
                </section>

                <section id="servicos" class="section">
                    <h2 class="section-title reveal">{"Serviços"}</h2>
                    <div class="card-grid">
                        { for SERVICES.iter().map(|(title, body)| html! {
                            <article class="card reveal stagger">
                                <h3>{ *title }</h3>
                                <p>{ *body }</p>
                            </article>
                        }) }
                    </div>
                </section>

                <section id="processo" class="section">
                    <h2 class="section-title reveal">{"Como funciona"}</h2>
                    <ol class="steps">
                        { for STEPS.iter().map(|(title, body)| html! {
                            <li class="step reveal stagger">
                                <h3>{ *title }</h3>
                                <p>{ *body }</p>
                            </li>
                        }) }
                    </ol>
                </section>

                <section id="contato" class="section contact-section">
                    <h2 class="section-title reveal">{"Vamos conversar?"}</h2>
                    <p class="section-subtitle reveal">
                        {"Preencha o formulário e eu respondo em até um dia útil."}
                    </p>
                    <div class="reveal">
                        <ContactWidget />
                    </div>
                </section>
            </main>

            <footer class="site-footer">
                <p>{"Feito com Rust e WebAssembly."}</p>
            </footer>
        </>
    }
}
