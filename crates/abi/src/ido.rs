use alloy::sol;

sol! {
    /// Public surface of the NaijaLoyalIDO sale contract.
    ///
    /// `getSaleInfo` aggregates the counters the individual accessors also
    /// expose; the individual accessors stay declared because the contract
    /// exposes them and callers may prefer single reads.
    #[sol(rpc)]
    interface INaijaLoyalIDO {
        /// Aggregate sale parameters in one read.
        function getSaleInfo()
            external
            view
            returns (
                uint256 tokenPrice,
                uint256 tokensAvailable,
                uint256 tokensSold,
                uint256 totalRaised,
                uint256 saleStart,
                uint256 saleEnd,
                bool active
            );

        function getUserPurchase(address buyer) external view returns (uint256);

        /// Value-bearing purchase entrypoint; ETH in, NLG out at `tokenPrice`.
        function buyTokens() external payable;

        function calculateTokenAmount(uint256 ethAmount) external view returns (uint256);
        function calculateEthAmount(uint256 tokenAmount) external view returns (uint256);

        function tokenPrice() external view returns (uint256);
        function minPurchase() external view returns (uint256);
        function maxPurchase() external view returns (uint256);
        function tokensAvailable() external view returns (uint256);
        function tokensSold() external view returns (uint256);
        function totalRaised() external view returns (uint256);
        function fundraisingTarget() external view returns (uint256);
        function saleActive() external view returns (bool);

        event TokensPurchased(address indexed buyer, uint256 amount, uint256 cost);
    }
}
