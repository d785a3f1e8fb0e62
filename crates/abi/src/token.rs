use alloy::sol;

sol! {
    /// ERC-20 surface of the NaijaLoyal (NLG) token, limited to what the
    /// storefront reads plus `transfer` for completeness.
    #[sol(rpc)]
    interface INaijaLoyal {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address recipient, uint256 amount) external returns (bool);
    }
}
