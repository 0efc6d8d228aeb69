use yew::prelude::*;
use gloo_timers::callback::Timeout;
use log::info;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::contact::form::{CAPTCHA_RECHECK_MS, SENT_RESET_MS};
use crate::contact::{ButtonState, ContactForm, Field};
use crate::integrations::{EmailJs, Recaptcha};

#[derive(Properties, PartialEq)]
pub struct ContactWidgetProps {
    #[prop_or(AttrValue::Static("Enviar mensagem"))]
    pub submit_label: AttrValue,
}

pub enum ContactWidgetMsg {
    Input(Field, String),
    Blur(Field),
    Submit,
    Delivered,
    Rejected(String),
    Settle,
    CaptchaClicked,
    CaptchaRecheck,
}

/// `#contact-form`: inline validation, bot-check and delivery through EmailJS.
pub struct ContactWidget {
    form: ContactForm<Recaptcha>,
    delivery: Option<EmailJs>,
    captcha: Option<Recaptcha>,
    form_ref: NodeRef,
    captcha_ref: NodeRef,
    settle_timer: Option<Timeout>,
    recheck_timer: Option<Timeout>,
}

impl Component for ContactWidget {
    type Message = ContactWidgetMsg;
    type Properties = ContactWidgetProps;

    fn create(ctx: &Context<Self>) -> Self {
        let delivery = EmailJs::detect();
        let captcha = Recaptcha::detect();

        Self {
            form: ContactForm::new(ctx.props().submit_label.to_string(), delivery.is_some(), captcha),
            delivery,
            captcha,
            form_ref: NodeRef::default(),
            captcha_ref: NodeRef::default(),
            settle_timer: None,
            recheck_timer: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        if let (Some(captcha), Some(container)) = (self.captcha, self.captcha_ref.cast::<Element>()) {
            let link = ctx.link().clone();
            captcha.render(container, move || link.send_message(ContactWidgetMsg::CaptchaRecheck));
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactWidgetMsg::Input(field, value) => {
                self.form.input(field, value);
                true
            }
            ContactWidgetMsg::Blur(field) => {
                self.form.blur(field);
                true
            }
            ContactWidgetMsg::Submit => {
                if let Err(e) = self.form.submit() {
                    info!("Contact form not sent: {}", e);
                    return true;
                }
                let (Some(delivery), Some(form)) =
                    (self.delivery.clone(), self.form_ref.cast::<HtmlFormElement>())
                else {
                    self.form.failed("contact form element is not mounted");
                    return true;
                };
                ctx.link().send_future(async move {
                    match delivery.send_form(&form).await {
                        Ok(()) => ContactWidgetMsg::Delivered,
                        Err(detail) => ContactWidgetMsg::Rejected(detail),
                    }
                });
                true
            }
            ContactWidgetMsg::Delivered => {
                self.form.sent();
                let link = ctx.link().clone();
                self.settle_timer = Some(Timeout::new(SENT_RESET_MS, move || {
                    link.send_message(ContactWidgetMsg::Settle);
                }));
                true
            }
            ContactWidgetMsg::Rejected(detail) => {
                self.form.failed(detail);
                true
            }
            ContactWidgetMsg::Settle => {
                self.settle_timer = None;
                self.form.settle();
                true
            }
            ContactWidgetMsg::CaptchaClicked => {
                let link = ctx.link().clone();
                self.recheck_timer = Some(Timeout::new(CAPTCHA_RECHECK_MS, move || {
                    link.send_message(ContactWidgetMsg::CaptchaRecheck);
                }));
                false
            }
            ContactWidgetMsg::CaptchaRecheck => {
                self.recheck_timer = None;
                self.form.recheck_captcha();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactWidgetMsg::Submit
        });
        let captcha_error = self.form.captcha_error();

        html! {
            <form id="contact-form" class="contact-form" ref={self.form_ref.clone()} {onsubmit} novalidate=true>
                { for Field::ALL.iter().map(|field| self.render_field(ctx, *field)) }

                if self.form.has_bot_check() {
                    <div class="form-group captcha-group">
                        <div
                            class="g-recaptcha"
                            ref={self.captcha_ref.clone()}
                            onclick={ctx.link().callback(|_| ContactWidgetMsg::CaptchaClicked)}
                        ></div>
                        <span class={classes!("error-text", captcha_error.is_active().then_some("active"))}>
                            { captcha_error.message() }
                        </span>
                    </div>
                }

                <button
                    type="submit"
                    class={classes!("btn", "btn-submit", (self.form.button_state() == ButtonState::Sent).then_some("is-success"))}
                    disabled={self.form.button_disabled()}
                >
                    { self.form.button_label() }
                </button>
            </form>
        }
    }
}

impl ContactWidget {
    fn render_field(&self, ctx: &Context<Self>, field: Field) -> Html {
        let error = self.form.error(field);
        let input_class = classes!("form-control", error.is_active().then_some("input-error"));
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactWidgetMsg::Blur(field));
        let (label, placeholder, kind) = match field {
            Field::Name => ("Nome", "Seu nome", "text"),
            Field::Email => ("E-mail", "voce@empresa.com", "email"),
            Field::Phone => ("Telefone", "(11) 98765-4321", "tel"),
            Field::Message => ("Mensagem", "Conte um pouco sobre o seu projeto", ""),
        };
        let id = format!("contact-{}", field.input_name());

        let input = if field == Field::Message {
            html! {
                <textarea
                    id={id.clone()}
                    name={field.input_name()}
                    class={input_class}
                    rows="5"
                    {placeholder}
                    value={self.form.value(field).to_string()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        ContactWidgetMsg::Input(field, input.value())
                    })}
                    {onblur}
                />
            }
        } else {
            html! {
                <input
                    id={id.clone()}
                    type={kind}
                    name={field.input_name()}
                    class={input_class}
                    {placeholder}
                    value={self.form.value(field).to_string()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        ContactWidgetMsg::Input(field, input.value())
                    })}
                    {onblur}
                />
            }
        };

        html! {
            <div class="form-group">
                <label for={id}>{ label }</label>
                { input }
                <span class={classes!("error-text", error.is_active().then_some("active"))}>
                    { error.message() }
                </span>
            </div>
        }
    }
}
