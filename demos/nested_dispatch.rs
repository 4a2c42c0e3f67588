//! Show the order in which a dispatch started from inside a callback is
//! delivered.

use fluxion::{logging, Action, Dispatcher};

fn main() {
    logging::init("fluxion=trace");

    println!("=== Nested Dispatch ===\n");

    let dispatcher = Dispatcher::new();

    dispatcher.register(|action| println!("   [first]  {}", action.name()));

    let nested = dispatcher.clone();
    dispatcher.register(move |action| {
        println!("   [second] {}", action.name());
        if let Action::IsSearchFieldEditing(true) = action {
            println!("   [second] dispatching is_search_field_editing(false)");
            nested.dispatch(Action::IsSearchFieldEditing(false));
            println!("   [second] nested dispatch returned");
        }
    });

    dispatcher.register(|action| println!("   [third]  {}", action.name()));

    println!("Dispatching is_search_field_editing(true):");
    dispatcher.dispatch(Action::IsSearchFieldEditing(true));

    println!("\nThe nested action reached every callback before [third] saw the outer one.");
}
