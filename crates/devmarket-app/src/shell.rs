//! Interactive command loop. Pages render to stdout; one command maps to
//! one page load or one dispatched action, mirroring the mount/fetch/
//! render/act cycle of the web client this replaces.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use uuid::Uuid;

use devmarket_client::orders::OrderAction;
use devmarket_client::{ApiClient, ClientConfig, Session};
use devmarket_types::api::PaymentProofCreate;
use devmarket_types::models::User;

use crate::views::admin::AdminView;
use crate::views::dashboard::{DashboardView, Tab};
use crate::views::gigs::{GigDetailView, GigForm, GigListView};
use crate::views::login;
use crate::views::messages::ConversationView;
use crate::views::order::OrderView;
use crate::views::review::ReviewForm;
use crate::views::Navigation;

const HELP: &str = "\
commands:
  gigs                            browse all services
  gig <id>                        view one gig
  buy <gig_id>                    order a gig
  post <title> | <desc> | <price> | <days>
                                  publish a new gig
  dashboard [buying|selling]      your orders / your gigs
  order <id>                      order detail and progress
  pay <order_id> <payer> | <reference> | <amount>
                                  submit payment proof
  confirm <order_id>              confirm payment (freelancer)
  deliver <order_id>              submit completed work (freelancer)
  approve <order_id>              approve submitted work (client)
  revision <order_id>             request a revision (client)
  review <order_id> <1-5> [comment]
                                  leave a review
  messages <user_id>              open a conversation
  say <text>                      send into the open conversation
  refresh                         re-pull the open conversation
  admin                           stats panel
  whoami                          current identity
  quit
";

pub struct Shell {
    api: ApiClient,
    config: ClientConfig,
    session: Session,
    conversation: Option<ConversationView>,
}

impl Shell {
    pub fn new(api: ApiClient, config: ClientConfig, session: Session) -> Self {
        Self {
            api,
            config,
            session,
            conversation: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        match self.session.user() {
            Some(user) => println!("signed in as {} <{}>", user.full_name, user.email),
            None => println!("browsing anonymously; authenticated pages will ask you to sign in"),
        }
        println!("type `help` for commands");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            // Realtime invalidation for the open conversation, without
            // blocking the prompt.
            if let Some(conv) = self.conversation.as_mut() {
                match conv.pump(&self.api).await {
                    Ok(true) => println!("{}", conv.render()),
                    Ok(false) => {}
                    Err(e) => println!("! {e}"),
                }
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "quit" | "exit") {
                break;
            }
            self.handle(line).await;
        }
        Ok(())
    }

    /// The viewer, or None after printing the login screen.
    fn require_user(&self) -> Option<User> {
        let user = self.session.user().cloned();
        if user.is_none() {
            println!("{}", login::render());
        }
        user
    }

    async fn handle(&mut self, line: &str) {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        debug!("command: {cmd}");

        match cmd {
            "help" => print!("{HELP}"),
            "whoami" => match self.session.user() {
                Some(user) => println!("{} <{}> ({})", user.full_name, user.email, user.id),
                None => println!("anonymous"),
            },
            "gigs" => {
                let view = GigListView::load(&self.api).await;
                println!("{}", view.render());
            }
            "gig" => match parse_id(rest) {
                Ok(id) => match GigDetailView::load(&self.api, id).await {
                    Ok(view) => println!("{}", view.render(&self.session)),
                    Err(e) => println!("! {e}"),
                },
                Err(e) => println!("! {e}"),
            },
            "buy" => self.buy(rest).await,
            "post" => self.post(rest).await,
            "dashboard" => self.dashboard(rest).await,
            "order" => self.order(rest).await,
            "pay" => self.pay(rest).await,
            "confirm" => self.transition(rest, OrderAction::ConfirmPayment).await,
            "deliver" => self.transition(rest, OrderAction::SubmitWork).await,
            "approve" => self.transition(rest, OrderAction::Approve).await,
            "revision" => self.transition(rest, OrderAction::RequestRevision).await,
            "review" => self.review(rest).await,
            "messages" => self.messages(rest).await,
            "say" => self.say(rest).await,
            "refresh" => self.refresh().await,
            "admin" => {
                if self.require_user().is_none() {
                    return;
                }
                match AdminView::load(&self.api).await {
                    Ok(view) => println!("{}", view.render()),
                    Err(e) => println!("! {e}"),
                }
            }
            other => println!("unknown command `{other}`; type `help`"),
        }
    }

    async fn buy(&mut self, rest: &str) {
        let Some(_user) = self.require_user() else {
            return;
        };
        let id = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        let view = match GigDetailView::load(&self.api, id).await {
            Ok(view) => view,
            Err(e) => return println!("! {e}"),
        };
        match view.order(&self.api, &self.session).await {
            Ok(nav) => self.goto(nav).await,
            Err(e) => println!("! {e}"),
        }
    }

    async fn post(&mut self, rest: &str) {
        if self.require_user().is_none() {
            return;
        }
        let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
        let [title, description, price, days] = parts.as_slice() else {
            return println!("! usage: post <title> | <desc> | <price> | <days>");
        };
        let (Ok(price), Ok(delivery_days)) = (price.parse::<f64>(), days.parse::<u32>()) else {
            return println!("! price must be a number and days an integer");
        };
        let form = GigForm {
            title: title.to_string(),
            description: description.to_string(),
            price,
            delivery_days,
        };
        match form.submit(&self.api).await {
            Ok(nav) => self.goto(nav).await,
            Err(e) => println!("! {e}"),
        }
    }

    async fn dashboard(&mut self, rest: &str) {
        let Some(user) = self.require_user() else {
            return;
        };
        let tab = match rest {
            "" | "buying" => Tab::Buying,
            "selling" => Tab::Selling,
            other => return println!("! unknown tab `{other}`"),
        };
        match DashboardView::load(&self.api, &user).await {
            Ok(mut view) => {
                view.switch(tab);
                println!("{}", view.render());
            }
            Err(e) => println!("! {e}"),
        }
    }

    async fn order(&mut self, rest: &str) {
        let Some(user) = self.require_user() else {
            return;
        };
        let id = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        match OrderView::load(&self.api, &user, id).await {
            Ok(view) => println!("{}", view.render()),
            Err(e) => println!("! {e}"),
        }
    }

    async fn pay(&mut self, rest: &str) {
        let Some(user) = self.require_user() else {
            return;
        };
        let (id, proof) = match rest.split_once(char::is_whitespace) {
            Some((id, proof)) => (id, proof),
            None => return println!("! usage: pay <order_id> <payer> | <reference> | <amount>"),
        };
        let id = match parse_id(id) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        let parts: Vec<&str> = proof.split('|').map(str::trim).collect();
        let [payer_name, proof_reference, amount] = parts.as_slice() else {
            return println!("! usage: pay <order_id> <payer> | <reference> | <amount>");
        };
        let Ok(amount) = amount.parse::<f64>() else {
            return println!("! amount must be a number");
        };
        let proof = PaymentProofCreate {
            proof_reference: proof_reference.to_string(),
            payer_name: payer_name.to_string(),
            amount,
        };
        self.run_action(&user, id, OrderAction::SubmitPayment, Some(proof))
            .await;
    }

    async fn transition(&mut self, rest: &str, action: OrderAction) {
        let Some(user) = self.require_user() else {
            return;
        };
        let id = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        self.run_action(&user, id, action, None).await;
    }

    async fn run_action(
        &mut self,
        user: &User,
        id: Uuid,
        action: OrderAction,
        proof: Option<PaymentProofCreate>,
    ) {
        let mut view = match OrderView::load(&self.api, user, id).await {
            Ok(view) => view,
            Err(e) => return println!("! {e}"),
        };
        match view.dispatch(&self.api, action, proof).await {
            Ok(Navigation::Stay) => println!("{}", view.render()),
            Ok(nav) => self.goto(nav).await,
            Err(e) => println!("! {e}"),
        }
    }

    async fn review(&mut self, rest: &str) {
        if self.require_user().is_none() {
            return;
        }
        let mut parts = rest.splitn(3, char::is_whitespace);
        let (Some(id), Some(rating)) = (parts.next(), parts.next()) else {
            return println!("! usage: review <order_id> <1-5> [comment]");
        };
        let id = match parse_id(id) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        let Ok(rating @ 1..=5) = rating.parse::<u8>() else {
            return println!("! rating must be 1-5");
        };
        let mut form = ReviewForm::new(id);
        form.rating = rating;
        form.comment = parts.next().unwrap_or_default().to_string();
        println!("{}", form.render());
        match form.submit(&self.api).await {
            Ok(nav) => self.goto(nav).await,
            Err(e) => println!("! {e}"),
        }
    }

    async fn messages(&mut self, rest: &str) {
        let Some(user) = self.require_user() else {
            return;
        };
        let peer = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return println!("! {e}"),
        };
        // Opening a new conversation tears the previous one down, closing
        // its channel.
        self.conversation = None;
        match ConversationView::open(&self.api, &self.config, &user, peer).await {
            Ok(view) => {
                println!("{}", view.render());
                if !view.has_channel() {
                    println!("(realtime updates unavailable; use `refresh`)");
                }
                self.conversation = Some(view);
            }
            Err(e) => println!("! {e}"),
        }
    }

    async fn say(&mut self, rest: &str) {
        let Some(conv) = self.conversation.as_mut() else {
            return println!("! no open conversation; use `messages <user_id>`");
        };
        if rest.is_empty() {
            return println!("! nothing to send");
        }
        match conv.send(&self.api, rest).await {
            Ok(()) => println!("{}", conv.render()),
            Err(e) => println!("! {e}"),
        }
    }

    async fn refresh(&mut self) {
        let Some(conv) = self.conversation.as_mut() else {
            return println!("! no open conversation");
        };
        match conv.pump(&self.api).await {
            Ok(_) => println!("{}", conv.render()),
            Err(e) => println!("! {e}"),
        }
    }

    async fn goto(&mut self, nav: Navigation) {
        match nav {
            Navigation::Stay => {}
            Navigation::Login => println!("{}", login::render()),
            Navigation::GigList => {
                let view = GigListView::load(&self.api).await;
                println!("{}", view.render());
            }
            Navigation::GigDetail(id) => match GigDetailView::load(&self.api, id).await {
                Ok(view) => println!("{}", view.render(&self.session)),
                Err(e) => println!("! {e}"),
            },
            Navigation::Dashboard => self.dashboard("").await,
            Navigation::OrderDetail(id) => self.order(&id.to_string()).await,
            Navigation::Conversation(peer) => self.messages(&peer.to_string()).await,
            Navigation::ReviewForm(id) => {
                println!("order complete; leave a review with `review {id} <1-5> [comment]`")
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("`{}` is not a valid id", raw.trim()))
}
