#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]

#[cfg(not(any(test, feature = "export-abi")))]
#[no_mangle]
pub extern "C" fn main() {}

/// Prints the relay's Solidity interface (`cargo stylus export-abi`).
#[cfg(feature = "export-abi")]
fn main() {
    use stylus_sdk::abi::export::print_abi;

    use intent_relay::IntentRelay;

    print_abi::<IntentRelay>("BUSL-1.1", "pragma solidity ^0.8.23;");
}
