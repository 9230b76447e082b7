//! # Contract Definitions
//!
//! The Solidity-facing multi-token interface the economy implements.

// The sol! macro generates code that we can't document, so allow missing_docs
#![allow(missing_docs)]

use alloy_sol_types::sol;

// Define the multi-token economy interface using alloy's sol! macro.
// The in-memory ledger mirrors this contract; a live deployment would bind
// these signatures against the real chain.
sol! {
    /// The fungible multi-token ledger the bridge is built against.
    ///
    /// Balances are kept per (owner, id). Transfers into a contract
    /// recipient invoke its receive hook and only finalize on the exact
    /// acknowledgement selector.
    #[derive(Debug)]
    interface IMultiToken {
        /// Emitted when a single-item transfer settles.
        event TransferSingle(
            address indexed operator,
            address indexed from,
            address indexed to,
            uint256 id,
            uint256 value
        );

        /// Emitted when a batch transfer settles.
        event TransferBatch(
            address indexed operator,
            address indexed from,
            address indexed to,
            uint256[] ids,
            uint256[] values
        );

        /// Moves `amount` of `id` from `from` to `to`, invoking the
        /// recipient's receive hook when `to` is a contract.
        function safeTransferFrom(
            address from,
            address to,
            uint256 id,
            uint256 amount,
            bytes data
        ) external;

        /// Batch form of `safeTransferFrom`.
        function safeBatchTransferFrom(
            address from,
            address to,
            uint256[] ids,
            uint256[] amounts,
            bytes data
        ) external;

        /// Gets the balance of `owner` for resource `id`.
        function balanceOf(address owner, uint256 id) external view returns (uint256);

        /// Capability discovery: answers true for supported interface ids.
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}
