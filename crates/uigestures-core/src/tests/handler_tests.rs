use super::*;

fn queue() -> Rc<RefCell<MessageQueue>> {
    Rc::new(RefCell::new(MessageQueue::new()))
}

#[test]
fn messages_pop_in_deadline_order() {
    let queue = queue();
    let handler = Handler::new(&queue, RecognizerId::new(1));
    handler.send_message_delayed(Message::LongPress, 500);
    handler.send_message_delayed(Message::TapTimeout, 100);

    assert_eq!(queue.borrow().next_deadline(), Some(100));
    assert_eq!(queue.borrow_mut().pop_due(50), None);
    assert_eq!(
        queue.borrow_mut().pop_due(600),
        Some((RecognizerId::new(1), Message::TapTimeout, 100))
    );
    assert_eq!(queue.borrow().now(), 100);
    assert_eq!(
        queue.borrow_mut().pop_due(600),
        Some((RecognizerId::new(1), Message::LongPress, 500))
    );
    assert_eq!(queue.borrow_mut().pop_due(600), None);
}

#[test]
fn equal_deadlines_keep_scheduling_order() {
    let queue = queue();
    let first = Handler::new(&queue, RecognizerId::new(1));
    let second = Handler::new(&queue, RecognizerId::new(2));
    second.send_message_delayed(Message::TapTimeout, 100);
    first.send_message_delayed(Message::TapTimeout, 100);

    let (owner, _, _) = queue.borrow_mut().pop_due(100).unwrap();
    assert_eq!(owner, RecognizerId::new(2));
    let (owner, _, _) = queue.borrow_mut().pop_due(100).unwrap();
    assert_eq!(owner, RecognizerId::new(1));
}

#[test]
fn delay_is_relative_to_queue_time() {
    let queue = queue();
    queue.borrow_mut().set_now(1_000);
    queue.borrow_mut().set_now(10);
    let handler = Handler::new(&queue, RecognizerId::new(1));
    handler.send_message_delayed(Message::SwipeTimeout, 50);
    assert_eq!(queue.borrow().next_deadline(), Some(1_050));
}

#[test]
fn remove_messages_only_touches_owner_and_kind() {
    let queue = queue();
    let tap = Handler::new(&queue, RecognizerId::new(1));
    let other = Handler::new(&queue, RecognizerId::new(2));
    tap.send_message_delayed(Message::TapTimeout, 100);
    tap.send_message_delayed(Message::MultiTapTimeout, 300);
    other.send_message_delayed(Message::TapTimeout, 100);

    tap.remove_messages(Message::TapTimeout);
    assert!(!tap.has_messages(Message::TapTimeout));
    assert!(tap.has_messages(Message::MultiTapTimeout));
    assert!(other.has_messages(Message::TapTimeout));
    assert_eq!(queue.borrow().len(), 2);

    tap.remove_all_messages();
    assert_eq!(queue.borrow().len(), 1);
}

#[test]
fn repeated_messages_stay_queued_until_removed() {
    let queue = queue();
    let handler = Handler::new(&queue, RecognizerId::new(1));
    handler.send_message_delayed(Message::TapTimeout, 100);
    handler.send_message_delayed(Message::TapTimeout, 200);
    assert_eq!(queue.borrow().len(), 2);

    handler.remove_messages(Message::TapTimeout);
    assert_eq!(queue.borrow().len(), 0);
    assert_eq!(queue.borrow().next_deadline(), None);
}

#[test]
fn remove_token_cancels_a_single_message() {
    let queue = queue();
    let handler = Handler::new(&queue, RecognizerId::new(1));
    let other = Handler::new(&queue, RecognizerId::new(2));
    let first = handler.send_message_delayed(Message::TapTimeout, 100).unwrap();
    handler.send_message_delayed(Message::TapTimeout, 200);

    // Tokens are owner-scoped: another recognizer cannot cancel this one.
    other.remove_token(first);
    assert_eq!(queue.borrow().len(), 2);

    handler.remove_token(first);
    assert_eq!(queue.borrow().len(), 1);
    assert_eq!(queue.borrow().next_deadline(), Some(200));
}

#[test]
fn handler_outliving_queue_is_inert() {
    let queue = queue();
    let handler = Handler::new(&queue, RecognizerId::new(1));
    drop(queue);

    assert_eq!(handler.send_message_delayed(Message::LongPress, 10), None);
    assert!(!handler.has_messages(Message::LongPress));
    handler.remove_all_messages();
}
