mod support;

use fundless::domain::{ConversationState, IndexWeights, AFFIRMATIVE_REPLY};
use fundless::port::{Keyboard, ReplyFormat, TradingError};
use fundless::testkit::domain::{index_weights, AUTHORIZED_CHAT};
use rust_decimal_macros::dec;
use support::bot::TestBot;

fn state(bot: &TestBot) -> ConversationState {
    bot.router.conversation().state(AUTHORIZED_CHAT)
}

#[tokio::test]
async fn savings_plan_presents_plan_and_asks() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;

    assert_eq!(state(&bot), ConversationState::Planning);
    assert!(bot.trading.submitted_orders().is_empty());

    let replies = bot.transport.replies();
    assert_eq!(replies[0].text, "Alright! I am computing the optimal buy order...");
    let table = replies
        .iter()
        .find(|r| r.format == ReplyFormat::Monospace)
        .expect("plan table");
    assert!(table.text.contains("  BTC:     60.00 $"));
    assert!(table.text.contains("  ADA:     10.00 $"));
    assert!(replies.iter().any(|r| r.text == "You are buying with USD"));

    let question = replies.last().unwrap();
    assert_eq!(question.text, "Should I proceed?");
    assert_eq!(
        question.keyboard,
        Keyboard::Options(vec!["Yes, sounds great!".to_string(), "Noo!".to_string()])
    );
}

#[tokio::test]
async fn affirmative_reply_submits_the_presented_plan() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;
    bot.transport.clear();

    bot.say(AFFIRMATIVE_REPLY).await;

    assert_eq!(state(&bot), ConversationState::Idle);
    assert_eq!(bot.trading.submitted_orders(), vec![index_weights()]);
    assert_eq!(bot.trading.weights_calls(), 1);

    let texts = bot.take_texts();
    assert_eq!(texts[0], "Great! I am buying your crypto on Kraken");
    assert_eq!(texts[1], "Your order volume is 100 $ ...");
    assert!(texts.contains(&"I did it!".to_string()));
}

#[tokio::test]
async fn negative_reply_acknowledges_without_order() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;
    bot.transport.clear();

    bot.say("Noo!").await;

    assert_eq!(state(&bot), ConversationState::Idle);
    assert!(bot.trading.submitted_orders().is_empty());
    let replies = bot.transport.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].keyboard, Keyboard::Remove);
}

#[tokio::test]
async fn unrecognized_replies_never_advance() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;

    for i in 0..100 {
        bot.transport.clear();
        bot.say(&format!("maybe {i}")).await;

        assert_eq!(state(&bot), ConversationState::Planning);
        assert_eq!(
            bot.take_texts(),
            vec![
                "Sorry, I didn't understand that.",
                "Would you like to proceed or cancel?"
            ]
        );
    }

    assert!(bot.trading.submitted_orders().is_empty());
}

#[tokio::test]
async fn cancel_resets_from_any_state() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;
    bot.transport.clear();

    bot.say("/cancel").await;
    assert_eq!(state(&bot), ConversationState::Idle);
    let replies = bot.transport.replies();
    assert_eq!(replies[0].text, "Bye! I hope we can talk again some day.");
    assert_eq!(replies[0].keyboard, Keyboard::Remove);

    bot.transport.clear();
    bot.say("/cancel").await;
    assert_eq!(
        bot.take_texts(),
        vec!["Bye! I hope we can talk again some day."]
    );
    assert_eq!(state(&bot), ConversationState::Idle);
}

#[tokio::test]
async fn second_savings_plan_recomputes() {
    let bot = TestBot::new();
    bot.say("/savings_plan").await;

    let updated = IndexWeights::new(vec![("btc".to_string(), dec!(1))]);
    bot.trading.push_weights(Ok(updated.clone()));
    bot.say("/savings_plan").await;

    assert_eq!(state(&bot), ConversationState::Planning);
    assert_eq!(bot.trading.weights_calls(), 2);

    bot.say(AFFIRMATIVE_REPLY).await;
    assert_eq!(bot.trading.submitted_orders(), vec![updated]);
}

#[tokio::test]
async fn exchange_failure_while_planning_returns_to_idle() {
    let bot = TestBot::new();
    bot.trading
        .push_weights(Err(TradingError::Exchange("EService:Unavailable".to_string())));

    bot.say("/savings_plan").await;

    assert_eq!(state(&bot), ConversationState::Idle);
    let texts = bot.take_texts();
    assert!(texts.contains(&"EService:Unavailable".to_string()));
    assert_eq!(
        texts[1],
        "Ohhh, there was a Problem with the exchange! Sorry :("
    );
}

#[tokio::test]
async fn order_failure_is_not_retried() {
    let bot = TestBot::new();
    bot.trading
        .set_order_result(Err(TradingError::Network("timeout".to_string())));

    bot.say("/savings_plan").await;
    bot.transport.clear();
    bot.say(AFFIRMATIVE_REPLY).await;

    assert_eq!(bot.trading.submitted_orders().len(), 1);
    assert_eq!(state(&bot), ConversationState::Idle);
    assert!(bot
        .take_texts()
        .contains(&"timeout".to_string()));
}
